//! ISO-week (Monday to Sunday) window arithmetic.
//!
//! Weekly attendance deduplication is derived purely from date arithmetic;
//! no "week" field is ever stored.

use chrono::{Datelike, Duration, NaiveDate};

/// The Monday and Sunday bounding the ISO week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    (monday, monday + Duration::days(6))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_midweek() {
        // 2024-01-03 is a Wednesday.
        assert_eq!(week_bounds(d(2024, 1, 3)), (d(2024, 1, 1), d(2024, 1, 7)));
    }

    #[test]
    fn test_monday_and_sunday_are_inclusive_bounds() {
        // Monday maps to itself; Sunday maps back to its Monday.
        assert_eq!(week_bounds(d(2024, 1, 1)), (d(2024, 1, 1), d(2024, 1, 7)));
        assert_eq!(week_bounds(d(2024, 1, 7)), (d(2024, 1, 1), d(2024, 1, 7)));
    }

    #[test]
    fn test_week_spanning_year_boundary() {
        // 2025-01-01 is a Wednesday; its week starts in 2024.
        assert_eq!(
            week_bounds(d(2025, 1, 1)),
            (d(2024, 12, 30), d(2025, 1, 5))
        );
    }

    #[test]
    fn test_adjacent_weeks_do_not_overlap() {
        let (_, sunday) = week_bounds(d(2024, 3, 6));
        let (next_monday, _) = week_bounds(sunday + Duration::days(1));
        assert_eq!(next_monday, sunday + Duration::days(1));
    }
}
