//! Snapshot export/import: the whole store as one JSON document.
//!
//! The format is a single object with a top-level `days` key mapping
//! `YYYY-MM-DD` date strings to day buckets:
//!
//! ```json
//! {
//!   "days": {
//!     "2025-03-03": {
//!       "weekday": "Monday",
//!       "sessions": [ { "id": "...", "subject": "Math", ... } ]
//!     }
//!   }
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::store::SessionStore;

/// Errors from snapshot import.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is not valid JSON, or its contents are shaped wrong.
    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// The top-level `days` grouping key is missing.
    #[error("Snapshot has no top-level `days` key")]
    MissingDays,
}

impl SessionStore {
    /// Serializes the whole store as a pretty-printed snapshot document.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Replaces the entire store with the contents of `json`, atomically.
    ///
    /// Shape validation only: the top level must carry the `days` grouping
    /// key. Per-record invariants are not re-checked here; aggregations
    /// re-clamp focused minutes on read instead. On any failure the current
    /// state is left untouched.
    pub fn import_json(&mut self, json: &str) -> Result<(), SnapshotError> {
        let value: Value = serde_json::from_str(json)?;
        if value.get("days").is_none() {
            return Err(SnapshotError::MissingDays);
        }

        *self = serde_json::from_value(value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::record::SessionDraft;

    fn draft(subject: &str) -> SessionDraft {
        SessionDraft {
            subject: subject.to_string(),
            start: "10:00".to_string(),
            end: "11:30".to_string(),
            pause_count: 1,
            focused_min: 60,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn populated_store() -> SessionStore {
        let mut store = SessionStore::new();
        store.add(date("2025-03-03"), &draft("Math")).unwrap();
        store.add(date("2025-03-03"), &draft("Physics")).unwrap();
        let doomed = store.add(date("2025-03-04"), &draft("History")).unwrap();
        store.add(date("2025-03-07"), &draft("French")).unwrap();
        store.delete(doomed);
        store
    }

    #[test]
    fn export_then_import_reproduces_the_store() {
        let store = populated_store();
        let json = store.export_json().unwrap();

        let mut restored = SessionStore::new();
        restored.import_json(&json).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn import_replaces_prior_state_wholesale() {
        let incoming = populated_store().export_json().unwrap();

        let mut store = SessionStore::new();
        store.add(date("2020-01-01"), &draft("Old")).unwrap();
        store.import_json(&incoming).unwrap();

        assert_eq!(store.session_count(), 3);
        assert!(!store.flatten().iter().any(|r| r.subject == "Old"));
    }

    #[test]
    fn missing_days_key_rejects_the_import() {
        let mut store = populated_store();
        let before = store.clone();

        let error = store.import_json(r#"{"sessions": []}"#).unwrap_err();
        assert!(matches!(error, SnapshotError::MissingDays));
        assert_eq!(store, before);
    }

    #[test]
    fn unparseable_json_rejects_the_import() {
        let mut store = populated_store();
        let before = store.clone();

        let error = store.import_json("not json at all").unwrap_err();
        assert!(matches!(error, SnapshotError::Parse(_)));
        assert_eq!(store, before);
    }

    #[test]
    fn misshapen_days_content_rejects_the_import() {
        let mut store = populated_store();
        let before = store.clone();

        assert!(store.import_json(r#"{"days": [1, 2, 3]}"#).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn imported_records_keep_out_of_bounds_focus_until_read() {
        // Import does not re-validate; the clamp is applied by readers.
        let json = r#"{
            "days": {
                "2025-03-03": {
                    "weekday": "Monday",
                    "sessions": [{
                        "id": "4f5a7a06-18d9-4a29-9a8c-1f8f2f4c9e01",
                        "subject": "Math",
                        "start": "10:00",
                        "end": "11:00",
                        "duration_min": 60,
                        "focused_min": 500,
                        "pause_count": 0,
                        "created_at": "2025-03-03T12:00:00Z"
                    }]
                }
            }
        }"#;

        let mut store = SessionStore::new();
        store.import_json(json).unwrap();

        let records = store.flatten();
        assert_eq!(records[0].focused_min, 500);
        assert_eq!(records[0].clamped_focused(), 60);
    }
}
