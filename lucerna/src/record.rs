//! Session record types: the stored entity, the flattened read model, and
//! the inbound draft.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::weekday::Weekday;

/// Subject used when a draft comes in with a blank subject field.
pub const DEFAULT_SUBJECT: &str = "Study";

/// One stored study interval.
///
/// Created fully formed by [`SessionStore::add`](crate::SessionStore::add)
/// and never mutated afterwards; deletion is wholesale. The field set is
/// exactly the snapshot format: calendar date and weekday are not duplicated
/// here, they live on the owning day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Stable identifier, used only for lookup and deletion.
    pub id: Uuid,
    pub subject: String,
    /// Wall-clock start, as entered (`HH:MM`).
    pub start: String,
    /// Wall-clock end, as entered (`HH:MM`).
    pub end: String,
    /// Elapsed minutes from `start` to `end`, computed once at creation.
    pub duration_min: u32,
    /// Minutes of genuine focus, clamped to `[0, duration_min]` at creation.
    pub focused_min: u32,
    /// Number of interruptions.
    pub pause_count: u32,
    /// Creation timestamp, for audit and display only.
    pub created_at: DateTime<Utc>,
}

/// A read-only view of one session joined with its day bucket.
///
/// This is what the store's `flatten` produces and what the KPI engine, the
/// weekday aggregation and the range filter consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub subject: String,
    pub start: String,
    pub end: String,
    pub duration_min: u32,
    pub focused_min: u32,
    pub pause_count: u32,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub(crate) fn from_session(date: NaiveDate, weekday: Weekday, session: &Session) -> Self {
        Self {
            id: session.id,
            date,
            weekday,
            subject: session.subject.clone(),
            start: session.start.clone(),
            end: session.end.clone(),
            duration_min: session.duration_min,
            focused_min: session.focused_min,
            pause_count: session.pause_count,
            created_at: session.created_at,
        }
    }

    /// Focused minutes clamped into `[0, duration_min]`.
    ///
    /// Creation already enforces the bound, but imported snapshots bypass
    /// it, so every aggregation re-applies the clamp on read.
    pub const fn clamped_focused(&self) -> u32 {
        if self.focused_min > self.duration_min {
            self.duration_min
        } else {
            self.focused_min
        }
    }
}

/// The raw per-session input supplied by the UI layer.
///
/// Numeric fields are signed on purpose: flooring the pause count at 0 and
/// clamping focused minutes into the session's duration is the store's job,
/// not the caller's.
#[derive(Debug, Clone)]
pub struct SessionDraft {
    pub subject: String,
    pub start: String,
    pub end: String,
    pub pause_count: i64,
    pub focused_min: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(duration_min: u32, focused_min: u32) -> SessionRecord {
        let date: NaiveDate = "2025-03-03".parse().unwrap();
        SessionRecord {
            id: Uuid::new_v4(),
            date,
            weekday: date.into(),
            subject: DEFAULT_SUBJECT.to_string(),
            start: "10:00".to_string(),
            end: "11:00".to_string(),
            duration_min,
            focused_min,
            pause_count: 0,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn clamp_caps_overreported_focus_at_duration() {
        assert_eq!(record_with(60, 500).clamped_focused(), 60);
    }

    #[test]
    fn clamp_leaves_valid_focus_alone() {
        assert_eq!(record_with(60, 45).clamped_focused(), 45);
        assert_eq!(record_with(60, 60).clamped_focused(), 60);
        assert_eq!(record_with(60, 0).clamped_focused(), 0);
    }
}
