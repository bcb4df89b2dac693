//! Personal cycle tracking and naive forecast.
//!
//! Pure date arithmetic, no I/O. The prediction uses fixed constants (a
//! 30-day average cycle and 3-day duration); they are not learned from the
//! recorded history. Known limitation, kept deliberately.

use chrono::{Days, NaiveDate};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Assumed days between the end of one cycle and the start of the next.
pub const AVERAGE_CYCLE_DAYS: u64 = 30;
/// Assumed duration of a cycle in days.
pub const CYCLE_DURATION_DAYS: u64 = 3;

#[derive(Error, Diagnostic, Debug)]
pub enum CycleError {
    #[error("Invalid interval: start {start} is not before end {end}")]
    #[diagnostic(
        code(cozysphere_core::invalid_interval),
        help("A cycle must start strictly before it ends")
    )]
    InvalidInterval { start: NaiveDate, end: NaiveDate },

    #[error("No cycle at position {index} (log holds {len})")]
    #[diagnostic(code(cozysphere_core::cycle_out_of_range))]
    OutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, CycleError>;

/// One tracked occurrence: a start date strictly before an end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl CycleInterval {
    /// Build a user-supplied interval, rejecting `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(CycleError::InvalidInterval { start, end })
        }
    }

    /// Build an interval without the ordering check, for seeding a log from
    /// previously recorded history.
    pub fn seeded(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Predict the next interval from a chronologically ordered history.
///
/// Returns `None` for an empty history; otherwise the next cycle is assumed
/// to start [`AVERAGE_CYCLE_DAYS`] after the last recorded end and run for
/// [`CYCLE_DURATION_DAYS`]. Dates past the calendar's representable range
/// also yield `None`.
pub fn predict_next(history: &[CycleInterval]) -> Option<CycleInterval> {
    let last = history.last()?;
    let start = last.end.checked_add_days(Days::new(AVERAGE_CYCLE_DAYS))?;
    let end = start.checked_add_days(Days::new(CYCLE_DURATION_DAYS))?;
    Some(CycleInterval { start, end })
}

/// Ordered cycle history, mutable only by append and positional removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleLog {
    intervals: Vec<CycleInterval>,
}

impl CycleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a log from recorded history, in the given order, unvalidated.
    pub fn seeded(intervals: Vec<CycleInterval>) -> Self {
        Self { intervals }
    }

    /// Append a user-supplied interval. On rejection the log is untouched.
    pub fn append(&mut self, start: NaiveDate, end: NaiveDate) -> Result<()> {
        let interval = CycleInterval::new(start, end)?;
        self.intervals.push(interval);
        Ok(())
    }

    /// Remove the interval at `index`, preserving the order of the rest.
    pub fn remove(&mut self, index: usize) -> Result<CycleInterval> {
        if index >= self.intervals.len() {
            return Err(CycleError::OutOfRange {
                index,
                len: self.intervals.len(),
            });
        }
        Ok(self.intervals.remove(index))
    }

    pub fn intervals(&self) -> &[CycleInterval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn predict_next(&self) -> Option<CycleInterval> {
        predict_next(&self.intervals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_prediction_is_thirty_days_after_last_end() {
        let log = CycleLog::seeded(vec![CycleInterval::seeded(
            date(2024, 1, 1),
            date(2024, 1, 4),
        )]);
        let next = log.predict_next().unwrap();
        assert_eq!(next.start(), date(2024, 2, 3));
        assert_eq!(next.end(), date(2024, 2, 6));
    }

    #[test]
    fn test_prediction_uses_only_the_last_interval() {
        let log = CycleLog::seeded(vec![
            CycleInterval::seeded(date(2023, 11, 1), date(2023, 11, 5)),
            CycleInterval::seeded(date(2023, 12, 2), date(2023, 12, 5)),
        ]);
        let next = log.predict_next().unwrap();
        assert_eq!(next.start(), date(2024, 1, 4));
        assert_eq!(next.end(), date(2024, 1, 7));
    }

    #[test]
    fn test_empty_history_predicts_nothing() {
        assert_eq!(predict_next(&[]), None);
        assert_eq!(CycleLog::new().predict_next(), None);
    }

    #[test]
    fn test_append_rejects_misordered_interval() {
        let mut log = CycleLog::seeded(vec![CycleInterval::seeded(
            date(2024, 1, 1),
            date(2024, 1, 4),
        )]);
        let before = log.clone();

        let err = log.append(date(2024, 2, 10), date(2024, 2, 10)).unwrap_err();
        assert!(matches!(err, CycleError::InvalidInterval { .. }));
        assert_eq!(log, before, "rejected append must leave the log unchanged");

        let err = log.append(date(2024, 2, 12), date(2024, 2, 10)).unwrap_err();
        assert!(matches!(err, CycleError::InvalidInterval { .. }));
        assert_eq!(log, before);
    }

    #[test]
    fn test_append_accepts_ordered_interval() {
        let mut log = CycleLog::new();
        log.append(date(2024, 1, 1), date(2024, 1, 4)).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.intervals()[0].start(), date(2024, 1, 1));
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let a = CycleInterval::seeded(date(2024, 1, 1), date(2024, 1, 4));
        let b = CycleInterval::seeded(date(2024, 2, 1), date(2024, 2, 4));
        let c = CycleInterval::seeded(date(2024, 3, 1), date(2024, 3, 4));
        let mut log = CycleLog::seeded(vec![a, b, c]);

        let removed = log.remove(1).unwrap();
        assert_eq!(removed, b);
        assert_eq!(log.intervals(), &[a, c]);
    }

    #[test]
    fn test_remove_out_of_range_is_an_error_and_harmless() {
        let a = CycleInterval::seeded(date(2024, 1, 1), date(2024, 1, 4));
        let mut log = CycleLog::seeded(vec![a]);
        let err = log.remove(3).unwrap_err();
        assert!(matches!(err, CycleError::OutOfRange { index: 3, len: 1 }));
        assert_eq!(log.intervals(), &[a]);
    }

    #[test]
    fn test_seeding_skips_validation() {
        // Recorded history may contain odd entries; seeding keeps them as-is
        let weird = CycleInterval::seeded(date(2024, 1, 4), date(2024, 1, 1));
        let log = CycleLog::seeded(vec![weird]);
        assert_eq!(log.len(), 1);
    }
}
