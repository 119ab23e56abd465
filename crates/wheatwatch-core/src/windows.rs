//! Deterministic observation-window schedule for a growing campaign.
//!
//! The schedule shape is fixed (contract v1): seven 14-day windows followed
//! by six 7-day windows, covering a 140-day horizon. Only the anchor date
//! moves the schedule; no external input changes its shape, so the same
//! campaign start always yields the same window count and ordering.

use chrono::{Duration, NaiveDate};

/// (offset from campaign start, window length), both in days.
const SCHEDULE: [(i64, i64); 13] = [
    (0, 14),
    (14, 14),
    (28, 14),
    (42, 14),
    (56, 14),
    (70, 14),
    (84, 14),
    (98, 7),
    (105, 7),
    (112, 7),
    (119, 7),
    (126, 7),
    (133, 7),
];

/// A half-open observation window `[start, start + length_days)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub length_days: i64,
}

impl DateWindow {
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(self.length_days)
    }
}

/// Generate the fixed window schedule anchored at `campaign_start`.
pub fn window_schedule(campaign_start: NaiveDate) -> Vec<DateWindow> {
    SCHEDULE
        .iter()
        .map(|&(offset, length_days)| DateWindow {
            start: campaign_start + Duration::days(offset),
            length_days,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn schedule_has_thirteen_windows() {
        let windows = window_schedule(date("2024-01-01"));
        assert_eq!(windows.len(), 13);
    }

    #[test]
    fn schedule_is_deterministic() {
        let a = window_schedule(date("2024-01-01"));
        let b = window_schedule(date("2024-01-01"));
        assert_eq!(a, b);
    }

    #[test]
    fn biweekly_windows_come_first() {
        let windows = window_schedule(date("2024-01-01"));
        assert!(windows[..7].iter().all(|w| w.length_days == 14));
        assert!(windows[7..].iter().all(|w| w.length_days == 7));
    }

    #[test]
    fn windows_are_contiguous_and_ordered() {
        let windows = window_schedule(date("2024-01-01"));
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start);
        }
    }

    #[test]
    fn horizon_spans_140_days() {
        let start = date("2024-01-01");
        let windows = window_schedule(start);
        assert_eq!(windows.first().unwrap().start, start);
        assert_eq!(windows.last().unwrap().end(), start + Duration::days(140));
    }

    #[test]
    fn window_end_is_exclusive_bound() {
        let w = DateWindow {
            start: date("2024-03-01"),
            length_days: 14,
        };
        assert_eq!(w.end(), date("2024-03-15"));
    }
}
