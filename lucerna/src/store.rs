//! The owned session collection, grouped by calendar date.
//!
//! The store is an explicit value owned by the caller. Nothing here reads
//! ambient state: construct one with [`SessionStore::new`], pass it (or the
//! flattened records it produces) to whatever needs it.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::{TimeFormatError, elapsed_minutes};
use crate::record::{DEFAULT_SUBJECT, Session, SessionDraft, SessionRecord};
use crate::weekday::Weekday;

/// All sessions logged under one calendar date, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Derived from the date once, stored to avoid recomputation.
    pub weekday: Weekday,
    pub sessions: Vec<Session>,
}

/// The collection of logged study sessions, grouped by calendar date.
///
/// Records are created fully formed by [`add`](Self::add), only ever removed
/// wholesale by [`delete`](Self::delete), and read through
/// [`flatten`](Self::flatten). A date bucket with no remaining sessions is
/// pruned. The serialized form of the whole store is the snapshot format
/// (see [`import_json`](Self::import_json)).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStore {
    pub(crate) days: BTreeMap<NaiveDate, DayEntry>,
}

/// What happened to each draft of an [`add_batch`](SessionStore::add_batch)
/// call: ids that landed, plus the index and error of every rejected draft.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub saved: Vec<Uuid>,
    pub rejected: Vec<(usize, TimeFormatError)>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates, normalizes and appends one draft under `date`.
    ///
    /// The duration is computed from the draft's time strings (failing with
    /// [`TimeFormatError`] if either does not parse), focused minutes are
    /// clamped into `[0, duration]`, the pause count is floored at 0, and a
    /// blank subject becomes [`DEFAULT_SUBJECT`]. The returned id is random,
    /// independent of the record's content, so identical-looking sessions
    /// never collide.
    pub fn add(&mut self, date: NaiveDate, draft: &SessionDraft) -> Result<Uuid, TimeFormatError> {
        let duration_min = elapsed_minutes(&draft.start, &draft.end)?;

        let subject = draft.subject.trim();
        let session = Session {
            id: Uuid::new_v4(),
            subject: if subject.is_empty() {
                DEFAULT_SUBJECT.to_string()
            } else {
                subject.to_string()
            },
            start: draft.start.trim().to_string(),
            end: draft.end.trim().to_string(),
            duration_min,
            focused_min: draft.focused_min.clamp(0, i64::from(duration_min)) as u32,
            pause_count: draft.pause_count.clamp(0, i64::from(u32::MAX)) as u32,
            created_at: Utc::now(),
        };

        let id = session.id;
        self.days
            .entry(date)
            .or_insert_with(|| DayEntry {
                weekday: Weekday::from(date),
                sessions: Vec::new(),
            })
            .sessions
            .push(session);

        Ok(id)
    }

    /// Adds every draft in order; a draft that fails validation is reported
    /// as a rejection without affecting the rest of the batch.
    pub fn add_batch(&mut self, date: NaiveDate, drafts: &[SessionDraft]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for (index, draft) in drafts.iter().enumerate() {
            match self.add(date, draft) {
                Ok(id) => outcome.saved.push(id),
                Err(error) => outcome.rejected.push((index, error)),
            }
        }
        outcome
    }

    /// Removes the session with the given id, wherever it lives.
    ///
    /// A bucket left empty by the removal is pruned. Unknown ids are a
    /// no-op, not an error.
    pub fn delete(&mut self, id: Uuid) {
        let mut emptied = None;
        for (date, day) in &mut self.days {
            let before = day.sessions.len();
            day.sessions.retain(|session| session.id != id);
            if day.sessions.len() != before {
                if day.sessions.is_empty() {
                    emptied = Some(*date);
                }
                break;
            }
        }
        if let Some(date) = emptied {
            self.days.remove(&date);
        }
    }

    /// All records, ascending by date and in insertion order within a date.
    pub fn flatten(&self) -> Vec<SessionRecord> {
        self.days
            .iter()
            .flat_map(|(date, day)| {
                day.sessions
                    .iter()
                    .map(|session| SessionRecord::from_session(*date, day.weekday, session))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of sessions across all dates.
    pub fn session_count(&self) -> usize {
        self.days.values().map(|day| day.sessions.len()).sum()
    }

    /// Earliest and latest dates holding at least one session.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.days.keys().next()?;
        let last = self.days.keys().next_back()?;
        Some((*first, *last))
    }

    /// Drops every session.
    pub fn reset(&mut self) {
        self.days.clear();
    }
}

/// Records whose date falls within `[start, end]`, both bounds inclusive.
///
/// Only the calendar date is compared. An inverted range selects nothing;
/// rejecting such ranges outright is the UI layer's job.
pub fn select_range(
    records: &[SessionRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<SessionRecord> {
    records
        .iter()
        .filter(|record| record.date >= start && record.date <= end)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(subject: &str, start: &str, end: &str, pauses: i64, focused: i64) -> SessionDraft {
        SessionDraft {
            subject: subject.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            pause_count: pauses,
            focused_min: focused,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn add_computes_duration_and_clamps_focus() {
        let mut store = SessionStore::new();
        store
            .add(date("2025-03-03"), &draft("Math", "10:00", "11:00", 2, 500))
            .unwrap();
        store
            .add(date("2025-03-03"), &draft("Math", "10:00", "11:00", 2, -10))
            .unwrap();

        let records = store.flatten();
        assert_eq!(records[0].duration_min, 60);
        assert_eq!(records[0].focused_min, 60);
        assert_eq!(records[1].focused_min, 0);
    }

    #[test]
    fn add_floors_negative_pause_counts() {
        let mut store = SessionStore::new();
        store
            .add(date("2025-03-03"), &draft("Math", "10:00", "11:00", -3, 30))
            .unwrap();
        assert_eq!(store.flatten()[0].pause_count, 0);
    }

    #[test]
    fn add_defaults_blank_subjects() {
        let mut store = SessionStore::new();
        store
            .add(date("2025-03-03"), &draft("   ", "10:00", "11:00", 0, 30))
            .unwrap();
        assert_eq!(store.flatten()[0].subject, DEFAULT_SUBJECT);
    }

    #[test]
    fn add_rejects_unparseable_times() {
        let mut store = SessionStore::new();
        let error = store
            .add(date("2025-03-03"), &draft("Math", "10am", "11:00", 0, 30))
            .unwrap_err();
        assert_eq!(error.input, "10am");
        assert!(store.is_empty());
    }

    #[test]
    fn ids_are_unique_across_identical_drafts() {
        let mut store = SessionStore::new();
        let d = draft("Math", "10:00", "11:00", 0, 30);
        let first = store.add(date("2025-03-03"), &d).unwrap();
        let second = store.add(date("2025-03-03"), &d).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn add_batch_keeps_valid_drafts_when_others_fail() {
        let mut store = SessionStore::new();
        let outcome = store.add_batch(
            date("2025-03-03"),
            &[
                draft("Math", "10:00", "11:00", 0, 30),
                draft("Physics", "bogus", "12:00", 0, 30),
                draft("History", "13:00", "14:00", 1, 45),
            ],
        );

        assert_eq!(outcome.saved.len(), 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].0, 1);
        assert_eq!(store.session_count(), 2);
    }

    #[test]
    fn flatten_orders_by_date_then_insertion() {
        let mut store = SessionStore::new();
        store
            .add(date("2025-03-10"), &draft("Later", "10:00", "11:00", 0, 0))
            .unwrap();
        store
            .add(date("2025-03-03"), &draft("First", "09:00", "10:00", 0, 0))
            .unwrap();
        store
            .add(date("2025-03-03"), &draft("Second", "20:00", "21:00", 0, 0))
            .unwrap();

        let subjects: Vec<_> = store.flatten().into_iter().map(|r| r.subject).collect();
        assert_eq!(subjects, ["First", "Second", "Later"]);
    }

    #[test]
    fn delete_removes_exactly_one_record() {
        let mut store = SessionStore::new();
        let keep = store
            .add(date("2025-03-03"), &draft("Keep", "10:00", "11:00", 0, 0))
            .unwrap();
        let drop = store
            .add(date("2025-03-03"), &draft("Drop", "11:00", "12:00", 0, 0))
            .unwrap();

        store.delete(drop);

        let records = store.flatten();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, keep);
    }

    #[test]
    fn delete_of_unknown_id_leaves_the_store_unchanged() {
        let mut store = SessionStore::new();
        store
            .add(date("2025-03-03"), &draft("Math", "10:00", "11:00", 0, 0))
            .unwrap();

        let snapshot = store.clone();
        store.delete(Uuid::new_v4());
        assert_eq!(store, snapshot);
    }

    #[test]
    fn delete_prunes_an_emptied_date_bucket() {
        let mut store = SessionStore::new();
        let only = store
            .add(date("2025-03-03"), &draft("Math", "10:00", "11:00", 0, 0))
            .unwrap();
        store
            .add(date("2025-03-04"), &draft("Math", "10:00", "11:00", 0, 0))
            .unwrap();

        store.delete(only);

        assert!(!store.days.contains_key(&date("2025-03-03")));
        assert_eq!(store.date_bounds(), Some((date("2025-03-04"), date("2025-03-04"))));
    }

    #[test]
    fn date_bounds_span_the_logged_dates() {
        let mut store = SessionStore::new();
        assert_eq!(store.date_bounds(), None);

        store
            .add(date("2025-03-05"), &draft("Math", "10:00", "11:00", 0, 0))
            .unwrap();
        store
            .add(date("2025-02-01"), &draft("Math", "10:00", "11:00", 0, 0))
            .unwrap();
        assert_eq!(store.date_bounds(), Some((date("2025-02-01"), date("2025-03-05"))));
    }

    #[test]
    fn select_range_is_inclusive_on_both_bounds() {
        let mut store = SessionStore::new();
        for day in ["2025-03-01", "2025-03-02", "2025-03-03", "2025-03-04"] {
            store
                .add(date(day), &draft(day, "10:00", "11:00", 0, 0))
                .unwrap();
        }
        let records = store.flatten();

        let selected = select_range(&records, date("2025-03-02"), date("2025-03-03"));
        let subjects: Vec<_> = selected.into_iter().map(|r| r.subject).collect();
        assert_eq!(subjects, ["2025-03-02", "2025-03-03"]);
    }

    #[test]
    fn select_range_with_inverted_bounds_selects_nothing() {
        let mut store = SessionStore::new();
        store
            .add(date("2025-03-03"), &draft("Math", "10:00", "11:00", 0, 0))
            .unwrap();

        let records = store.flatten();
        assert!(select_range(&records, date("2025-03-04"), date("2025-03-02")).is_empty());
    }

    #[test]
    fn reset_drops_everything() {
        let mut store = SessionStore::new();
        store
            .add(date("2025-03-03"), &draft("Math", "10:00", "11:00", 0, 0))
            .unwrap();
        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.session_count(), 0);
    }
}
