//! Due-string handling and the overdue predicate.
//!
//! A due value is either `"YYYY-MM-DD"` or `"YYYY-MM-DD HH:MM"`. All
//! comparisons are on the raw strings: zero-padded values of this shape
//! order the same lexically as chronologically, and the lexical ordering of
//! uneven-length strings is part of the service's observable contract.

use chrono::Local;

/// Format of the "now" instant every due value is compared against.
pub const NOW_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Builds a due string from a date and an optional time component.
///
/// A missing time component yields a date-only due value.
pub fn combine_due(date: &str, time: Option<&str>) -> String {
    match time {
        Some(time) if !time.is_empty() => format!("{} {}", date, time),
        _ => date.to_string(),
    }
}

/// Splits a due string into its date and time parts. The time part is empty
/// for date-only values; edit forms are pre-filled from this.
pub fn split_due(due: &str) -> (&str, &str) {
    match due.split_once(' ') {
        Some((date, time)) => (date, time),
        None => (due, ""),
    }
}

/// The instant a due value is measured at: date-only values roll forward to
/// the last second of that day, timed values are taken as given.
pub fn effective_instant(due: &str) -> String {
    if due.contains(' ') {
        due.to_string()
    } else {
        format!("{} 23:59:59", due)
    }
}

/// A task is overdue when its effective instant is strictly before `now`
/// (`now` in [`NOW_FORMAT`]).
pub fn is_overdue(due: &str, now: &str) -> bool {
    effective_instant(due).as_str() < now
}

/// The current local time in [`NOW_FORMAT`].
pub fn now_string() -> String {
    Local::now().format(NOW_FORMAT).to_string()
}

/// Today's local date, used as the create-form default.
pub fn today_string() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// The current local time of day, used as the create-form default.
pub fn current_time_string() -> String {
    Local::now().format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_due() {
        assert_eq!(combine_due("2024-01-01", Some("10:00")), "2024-01-01 10:00");
        assert_eq!(combine_due("2024-01-01", None), "2024-01-01");
        // A blank time field falls back to a date-only due value.
        assert_eq!(combine_due("2024-01-01", Some("")), "2024-01-01");
    }

    #[test]
    fn test_split_due() {
        assert_eq!(split_due("2024-01-01 10:00"), ("2024-01-01", "10:00"));
        assert_eq!(split_due("2024-01-01"), ("2024-01-01", ""));
    }

    #[test]
    fn test_effective_instant_rolls_date_only_forward() {
        assert_eq!(effective_instant("2024-01-01"), "2024-01-01 23:59:59");
        assert_eq!(effective_instant("2024-01-01 10:00"), "2024-01-01 10:00");
    }

    #[test]
    fn test_date_only_due_overdue_boundaries() {
        assert!(is_overdue("2024-01-01", "2024-01-02 00:00:00"));
        assert!(!is_overdue("2024-01-01", "2023-12-31 23:59:59"));
        // Strictly less than: the effective instant itself is not overdue.
        assert!(!is_overdue("2024-01-01", "2024-01-01 23:59:59"));
    }

    #[test]
    fn test_timed_due_overdue_boundaries() {
        assert!(!is_overdue("2024-01-01 10:00", "2024-01-01 09:00"));
        assert!(is_overdue("2024-01-01 10:00", "2024-01-01 11:00"));
    }

    #[test]
    fn test_comparison_is_lexical() {
        // A timed value is a longer string that extends its date prefix, so
        // it sorts after the bare date.
        assert!("2024-01-01" < "2024-01-01 10:00");
        assert!(is_overdue("2024-01-01 10:00", "2024-01-01 10:00:30"));
    }

    #[test]
    fn test_now_string_shape() {
        let now = now_string();
        assert_eq!(now.len(), 19);
        assert_eq!(&now[4..5], "-");
        assert_eq!(&now[10..11], " ");
        assert_eq!(&now[13..14], ":");
    }
}
