use std::collections::BTreeMap;

use chrono::Utc;

use crate::domain::{Application, DomainError, NewApplication, Status, validate_new_application};

/// In-memory collection of rental applications plus the id counter.
///
/// Owned by `main` and shared behind `Arc<tokio::sync::Mutex<_>>`; the mutex
/// keeps store mutations serialized under the multi-threaded runtime.
#[derive(Debug)]
pub struct ApplicationStore {
    applications: BTreeMap<u64, Application>,
    next_id: u64,
}

impl ApplicationStore {
    pub fn new() -> Self {
        Self {
            applications: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Validates and stores a submission. Ids are sequential and never
    /// reused; a failed validation consumes no id and stores nothing.
    pub fn submit(&mut self, new: NewApplication) -> Result<Application, DomainError> {
        validate_new_application(&new)?;

        let id = self.next_id;
        self.next_id += 1;

        let application = Application {
            id,
            name: new.name,
            phone: new.phone,
            email: new.email,
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            purpose: new.purpose,
            participants: new.participants,
            notes: new.notes,
            status: Status::Pending,
            admin_notes: None,
            submitted_at: Utc::now(),
            updated_at: None,
        };
        self.applications.insert(id, application.clone());
        Ok(application)
    }

    /// All applications, most recent first. Ties keep insertion order: the
    /// map iterates in ascending id order and the sort is stable.
    pub fn list(&self) -> Vec<Application> {
        let mut items: Vec<Application> = self.applications.values().cloned().collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        items
    }

    pub fn get(&self, id: u64) -> Option<Application> {
        self.applications.get(&id).cloned()
    }

    /// Sets `status` and `admin_notes` in place and stamps `updated_at`.
    /// Any status may be set from any status; an absent `notes` clears the
    /// previous annotation. The store is untouched on any error.
    pub fn update_status(
        &mut self,
        id: u64,
        status: &str,
        notes: Option<String>,
    ) -> Result<Application, DomainError> {
        let status = Status::parse(status)?;
        let application = self
            .applications
            .get_mut(&id)
            .ok_or(DomainError::MissingApplication { id })?;

        application.status = status;
        application.admin_notes = notes;
        application.updated_at = Some(Utc::now());
        Ok(application.clone())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn submission(name: &str) -> NewApplication {
        NewApplication {
            name: name.to_string(),
            phone: "010-0000-0000".to_string(),
            email: "a@b.com".to_string(),
            date: "2025-01-01".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            purpose: "회의".to_string(),
            participants: 10,
            notes: None,
        }
    }

    #[test]
    fn submit_assigns_sequential_ids_starting_at_one() {
        let mut store = ApplicationStore::new();
        let mut last_id = 0;
        for n in 1u64..=3 {
            let app = store.submit(submission(&format!("user-{n}"))).unwrap();
            assert_eq!(app.id, n);
            assert!(app.id > last_id);
            last_id = app.id;
        }
    }

    #[test]
    fn submit_sets_pending_status_and_submission_timestamp() {
        let mut store = ApplicationStore::new();
        let app = store.submit(submission("Kim")).unwrap();
        assert_eq!(app.status, Status::Pending);
        assert_eq!(app.admin_notes, None);
        assert_eq!(app.updated_at, None);
        assert_eq!(store.get(app.id), Some(app));
    }

    #[test]
    fn failed_submit_stores_nothing_and_consumes_no_id() {
        let mut store = ApplicationStore::new();

        let mut bad = submission("Kim");
        bad.participants = 0;
        assert!(store.submit(bad).is_err());
        assert_eq!(store.list().len(), 0);

        let app = store.submit(submission("Kim")).unwrap();
        assert_eq!(app.id, 1);
    }

    #[test]
    fn list_returns_submissions_most_recent_first() {
        let mut store = ApplicationStore::new();
        for n in 1..=3 {
            store.submit(submission(&format!("user-{n}"))).unwrap();
        }

        let items = store.list();
        assert_eq!(items.len(), 3);
        for pair in items.windows(2) {
            assert!(pair[0].submitted_at >= pair[1].submitted_at);
            if pair[0].submitted_at == pair[1].submitted_at {
                // Stable tie-break: insertion order.
                assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn update_status_mutates_the_record_in_place() {
        let mut store = ApplicationStore::new();
        let submitted = store.submit(submission("Kim")).unwrap();

        let updated = store
            .update_status(submitted.id, "approved", Some("ok".to_string()))
            .unwrap();
        assert_eq!(updated.id, submitted.id);
        assert_eq!(updated.status, Status::Approved);
        assert_eq!(updated.admin_notes, Some("ok".to_string()));
        assert_eq!(updated.submitted_at, submitted.submitted_at);
        let updated_at = updated.updated_at.expect("updated_at is stamped");
        assert!(updated_at > submitted.submitted_at);

        assert_eq!(store.get(submitted.id), Some(updated));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn update_status_on_unknown_id_leaves_the_store_unchanged() {
        let mut store = ApplicationStore::new();
        store.submit(submission("Kim")).unwrap();
        let before = store.list();

        let err = store.update_status(999, "approved", None).unwrap_err();
        assert_eq!(err, DomainError::MissingApplication { id: 999 });
        assert_eq!(store.list(), before);
    }

    #[test]
    fn update_status_rejects_unknown_status_values() {
        let mut store = ApplicationStore::new();
        let app = store.submit(submission("Kim")).unwrap();
        let before = store.list();

        for raw in ["archived", "Approved", ""] {
            let err = store.update_status(app.id, raw, None).unwrap_err();
            assert_eq!(
                err,
                DomainError::InvalidStatus {
                    status: raw.to_string()
                }
            );
        }
        assert_eq!(store.list(), before);
    }

    #[test]
    fn update_status_allows_any_transition() {
        let mut store = ApplicationStore::new();
        let app = store.submit(submission("Kim")).unwrap();

        for status in ["approved", "rejected", "pending", "approved"] {
            let updated = store.update_status(app.id, status, None).unwrap();
            assert_eq!(updated.status.as_str(), status);
        }
    }

    #[test]
    fn update_status_with_absent_notes_clears_the_annotation() {
        let mut store = ApplicationStore::new();
        let app = store.submit(submission("Kim")).unwrap();

        store
            .update_status(app.id, "approved", Some("ok".to_string()))
            .unwrap();
        let updated = store.update_status(app.id, "rejected", None).unwrap();
        assert_eq!(updated.admin_notes, None);
    }
}
