use tracing::info;

use crate::{config::Config, domain::Application};

/// Formats the submitter-facing confirmation mail for a received request.
pub fn confirmation_email(config: &Config, application: &Application) -> String {
    let notes = application.notes.as_deref().unwrap_or("none");

    let mut body = format!(
        "Your facility rental request has been received.\n\
         \n\
         Applicant: {name}\n\
         Contact: {phone}\n\
         Email: {email}\n\
         Date of use: {date}\n\
         Time: {start_time} - {end_time}\n\
         Purpose: {purpose}\n\
         Expected participants: {participants}\n\
         Additional notes: {notes}\n\
         \n\
         We will contact you shortly.\n\
         \n\
         {facility}\n",
        name = application.name,
        phone = application.phone,
        email = application.email,
        date = application.date,
        start_time = application.start_time,
        end_time = application.end_time,
        purpose = application.purpose,
        participants = application.participants,
        facility = config.facility_name,
    );
    if !config.contact_phone.is_empty() {
        body.push_str(&format!("Phone: {}\n", config.contact_phone));
    }
    if !config.contact_email.is_empty() {
        body.push_str(&format!("Email: {}\n", config.contact_email));
    }
    body
}

/// Delivery stub: the mail is logged, never sent.
pub fn send_confirmation(config: &Config, application: &Application) {
    let body = confirmation_email(config, application);
    info!(
        application_id = application.id,
        recipient = %application.email,
        "confirmation email (delivery stubbed):\n{body}"
    );
}
