//! # KPI Engine - Aggregate Focus Metrics
//!
//! Reduces an arbitrary selection of session records to the focus KPIs the
//! dashboard displays: total and focused minutes, pause total, the focus
//! ratio, a 0-5 average focus score, and the pause rate per hour.
//!
//! Two normalization rules shape the numbers:
//!
//! - Focused minutes are re-clamped into each record's duration while
//!   summing, so over-reported focus from an imported snapshot can never
//!   push the ratio past 1.0.
//! - Interruptions are reported per hour of total study time rather than as
//!   a raw count, so long sessions are not penalized relative to short ones.
//!
//! An empty selection is a distinct state, not a zero-filled summary:
//! [`KpiSummary::compute`] returns `None` so a caller can render "no data"
//! instead of a misleading "0% focus".

use crate::record::SessionRecord;

/// Aggregate focus metrics over one selection of session records.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSummary {
    /// Σ duration over the selection, in minutes.
    pub total_minutes: u64,
    /// Σ clamped focused minutes over the selection.
    pub focused_minutes: u64,
    /// Σ pause counts over the selection.
    pub pause_total: u64,
    /// `focused_minutes / total_minutes`, in `[0, 1]`.
    pub focus_ratio: f64,
    /// `focus_ratio * 5`, a 0-5 scale. No extra clamping: the ratio is
    /// already bounded by construction.
    pub average_focus_score: f64,
    /// Pauses per hour of total study time.
    pub pause_rate_per_hour: f64,
    /// Number of records in the selection.
    pub session_count: usize,
}

impl KpiSummary {
    /// Computes the KPI summary over `records`.
    ///
    /// Returns `None` for an empty selection.
    pub fn compute(records: &[SessionRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let total_minutes: u64 = records.iter().map(|r| u64::from(r.duration_min)).sum();
        let focused_minutes: u64 = records.iter().map(|r| u64::from(r.clamped_focused())).sum();
        let pause_total: u64 = records.iter().map(|r| u64::from(r.pause_count)).sum();

        let focus_ratio = if total_minutes > 0 {
            focused_minutes as f64 / total_minutes as f64
        } else {
            0.0
        };
        let pause_rate_per_hour = if total_minutes > 0 {
            pause_total as f64 / (total_minutes as f64 / 60.0)
        } else {
            0.0
        };

        Some(Self {
            total_minutes,
            focused_minutes,
            pause_total,
            focus_ratio,
            average_focus_score: focus_ratio * 5.0,
            pause_rate_per_hour,
            session_count: records.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, Utc};
    use uuid::Uuid;

    use super::*;

    fn record(duration_min: u32, focused_min: u32, pause_count: u32) -> SessionRecord {
        let date: NaiveDate = "2025-03-03".parse().unwrap();
        SessionRecord {
            id: Uuid::new_v4(),
            date,
            weekday: date.into(),
            subject: "Math".to_string(),
            start: "10:00".to_string(),
            end: "11:00".to_string(),
            duration_min,
            focused_min,
            pause_count,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn empty_selection_has_no_summary() {
        assert_eq!(KpiSummary::compute(&[]), None);
    }

    #[test]
    fn summary_matches_the_reference_example() {
        // Two records: {60 min, 30 focused, 2 pauses} and {30 min, 30
        // focused, 1 pause} → 90 total, 60 focused, ratio 2/3, score 10/3,
        // 3 pauses in 1.5 hours.
        let records = [record(60, 30, 2), record(30, 30, 1)];
        let kpi = KpiSummary::compute(&records).unwrap();

        assert_eq!(kpi.total_minutes, 90);
        assert_eq!(kpi.focused_minutes, 60);
        assert_eq!(kpi.pause_total, 3);
        assert_eq!(kpi.session_count, 2);
        assert!((kpi.focus_ratio - 0.6667).abs() < 1e-4);
        assert!((kpi.average_focus_score - 3.3333).abs() < 1e-4);
        assert!((kpi.pause_rate_per_hour - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn overreported_focus_is_clamped_while_summing() {
        let records = [record(60, 500, 0)];
        let kpi = KpiSummary::compute(&records).unwrap();

        assert_eq!(kpi.focused_minutes, 60);
        assert!((kpi.focus_ratio - 1.0).abs() < f64::EPSILON);
        assert!((kpi.average_focus_score - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_total_minutes_does_not_divide_by_zero() {
        // Only reachable with records from an external source; sessions
        // created through the store always last at least a minute.
        let records = [record(0, 0, 4)];
        let kpi = KpiSummary::compute(&records).unwrap();

        assert_eq!(kpi.total_minutes, 0);
        assert_eq!(kpi.focus_ratio, 0.0);
        assert_eq!(kpi.average_focus_score, 0.0);
        assert_eq!(kpi.pause_rate_per_hour, 0.0);
        assert_eq!(kpi.session_count, 1);
    }

    #[test]
    fn score_spans_the_whole_scale() {
        let none = [record(60, 0, 0)];
        assert_eq!(KpiSummary::compute(&none).unwrap().average_focus_score, 0.0);

        let all = [record(60, 60, 0)];
        assert_eq!(KpiSummary::compute(&all).unwrap().average_focus_score, 5.0);
    }
}
