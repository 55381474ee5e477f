use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%b %d %Y %H:%M:%S",
    "%b %d %Y %H:%M",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%d %b %Y",
];

/// Parse a human-entered timestamp; any failure is `None`, never an error.
///
/// RFC 3339 input (with an offset) is converted to naive UTC; everything else
/// is taken at face value. Slash dates are month-first. Bare dates resolve to
/// midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::parse_timestamp;

    #[test]
    fn parses_common_forms() {
        let expected = parse_timestamp("2025-10-10 14:05:00").expect("valid");
        for raw in [
            "2025-10-10T14:05:00",
            "2025/10/10 14:05:00",
            "10/10/2025 14:05",
            "Oct 10 2025 14:05",
            "Oct 10, 2025 14:05:00",
            "10 Oct 2025 14:05",
        ] {
            assert_eq!(parse_timestamp(raw), Some(expected), "format: {raw}");
        }
    }

    #[test]
    fn rfc3339_offset_becomes_naive_utc() {
        let parsed = parse_timestamp("2025-10-10T14:05:00+02:00").expect("valid");
        assert_eq!(parsed, parse_timestamp("2025-10-10 12:05:00").expect("valid"));
    }

    #[test]
    fn bare_date_is_midnight() {
        let parsed = parse_timestamp("2025-10-10").expect("valid");
        assert_eq!(parsed, parse_timestamp("2025-10-10 00:00:00").expect("valid"));
    }

    #[test]
    fn month_names_accept_full_spelling() {
        assert!(parse_timestamp("October 10, 2025 14:05").is_some());
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2025-13-40 99:99:99"), None);
    }
}
