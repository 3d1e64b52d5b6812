use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_PARTICIPANTS: u32 = 1;
pub const MAX_PARTICIPANTS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    MissingField {
        field: &'static str,
    },
    InvalidTimeRange {
        start_time: String,
        end_time: String,
    },
    InvalidParticipants {
        participants: u32,
    },
    InvalidStatus {
        status: String,
    },
    MissingApplication {
        id: u64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing required field: {field}"),
            Self::InvalidTimeRange {
                start_time,
                end_time,
            } => write!(
                f,
                "endTime must be later than startTime: {start_time} >= {end_time}"
            ),
            Self::InvalidParticipants { participants } => write!(
                f,
                "participants must be between {MIN_PARTICIPANTS} and {MAX_PARTICIPANTS}: {participants}"
            ),
            Self::InvalidStatus { status } => write!(f, "invalid status: {status}"),
            Self::MissingApplication { id } => write!(f, "application not found: {id}"),
        }
    }
}

impl std::error::Error for DomainError {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Approved,
    Rejected,
}

impl Status {
    /// Exact-match parse of the wire value. Case variants are rejected.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidStatus {
                status: raw.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// One submitted facility-rental request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub purpose: String,
    pub participants: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Submission payload, as posted by the public form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub purpose: String,
    pub participants: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn validate_new_application(new: &NewApplication) -> Result<(), DomainError> {
    let required: [(&'static str, &str); 7] = [
        ("name", &new.name),
        ("phone", &new.phone),
        ("email", &new.email),
        ("date", &new.date),
        ("startTime", &new.start_time),
        ("endTime", &new.end_time),
        ("purpose", &new.purpose),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(DomainError::MissingField { field });
        }
    }

    // Lexicographic comparison; numeric order coincides for zero-padded HH:MM.
    if new.start_time >= new.end_time {
        return Err(DomainError::InvalidTimeRange {
            start_time: new.start_time.clone(),
            end_time: new.end_time.clone(),
        });
    }

    if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&new.participants) {
        return Err(DomainError::InvalidParticipants {
            participants: new.participants,
        });
    }

    Ok(())
}
