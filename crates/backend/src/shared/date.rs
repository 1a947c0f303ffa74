//! Legacy date and timestamp format migration
//!
//! Old snapshots stored range bounds as ISO `YYYY-MM-DD` strings and
//! timestamp defaults as raw Unix timestamps. The current display format is
//! `DD-MM-YYYY`, with the time in front for datetime fields. Values that do
//! not parse as an old format are passed through unchanged.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};

const DATE_FORMAT: &str = "%d-%m-%Y";
const DATETIME_FORMAT: &str = "%H:%M %d-%m-%Y";

fn parse_old_format(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// True iff the value still uses the old ISO date or datetime format.
pub fn is_old_date_format(value: &str) -> bool {
    parse_old_format(value).is_some()
}

/// Rewrites an old-format date string to the current display format.
///
/// `date` fields render as `DD-MM-YYYY`; `datetime` fields as
/// `HH:MM DD-MM-YYYY` with a missing time rendered as `00:00`. Values that
/// are not in the old format are returned untouched.
pub fn convert_old_to_new_format(db_type: &str, value: &str) -> String {
    let Some(parsed) = parse_old_format(value) else {
        return value.to_string();
    };
    let format = if db_type == "date" {
        DATE_FORMAT
    } else {
        DATETIME_FORMAT
    };
    parsed.format(format).to_string()
}

/// Converts a Unix timestamp to the display date format, in server-local
/// time. The datetime format is used iff the comma-separated `eval` list
/// contains `datetime`.
pub fn convert_timestamp_to_date(eval: &str, timestamp: i64) -> String {
    let format = if eval_contains(eval, "datetime") {
        DATETIME_FORMAT
    } else {
        DATE_FORMAT
    };
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(moment) => moment.format(format).to_string(),
        None => timestamp.to_string(),
    }
}

/// Whether an `eval` list like `int,date` contains the given entry.
pub fn eval_contains(eval: &str, entry: &str) -> bool {
    eval.split(',').any(|part| part.trim() == entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_old_date_format() {
        assert!(is_old_date_format("2021-01-01"));
        assert!(is_old_date_format("2021-01-01 10:10"));
        assert!(!is_old_date_format("01-01-2021"));
        assert!(!is_old_date_format("10:10 01-01-2021"));
        assert!(!is_old_date_format(""));
    }

    #[test]
    fn test_converts_old_date() {
        assert_eq!(convert_old_to_new_format("date", "2021-01-01"), "01-01-2021");
    }

    #[test]
    fn test_converts_old_datetime_time_first() {
        assert_eq!(
            convert_old_to_new_format("datetime", "2021-01-01 10:10"),
            "10:10 01-01-2021"
        );
    }

    #[test]
    fn test_datetime_without_time_renders_midnight() {
        assert_eq!(
            convert_old_to_new_format("datetime", "2021-01-01"),
            "00:00 01-01-2021"
        );
    }

    #[test]
    fn test_new_format_passes_through() {
        assert_eq!(convert_old_to_new_format("date", "01-01-2021"), "01-01-2021");
    }

    #[test]
    fn test_timestamp_renders_local_date() {
        let expected = Local
            .timestamp_opt(1623081120, 0)
            .single()
            .unwrap()
            .format("%d-%m-%Y")
            .to_string();
        assert_eq!(convert_timestamp_to_date("int,date", 1623081120), expected);
    }

    #[test]
    fn test_timestamp_datetime_eval_includes_time() {
        let expected = Local
            .timestamp_opt(1623081120, 0)
            .single()
            .unwrap()
            .format("%H:%M %d-%m-%Y")
            .to_string();
        assert_eq!(
            convert_timestamp_to_date("int,datetime", 1623081120),
            expected
        );
    }
}
