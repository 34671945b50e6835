//! Timestamp parsing and "time ago" labels

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a server timestamp. Accepts RFC 3339 and naive ISO forms; naive
/// values are taken as UTC.
pub fn parse_created_at(created_at: &str) -> Option<DateTime<Utc>> {
    let created_at = created_at.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(created_at) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(created_at, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Short relative label such as `5 min ago` or `2 days ago`.
/// Blank or unparsable input gives an empty string.
pub fn format_relative_time(created_at: &str, now: DateTime<Utc>) -> String {
    if created_at.trim().is_empty() {
        return String::new();
    }
    let Some(created) = parse_created_at(created_at) else {
        return String::new();
    };

    let elapsed = now.signed_duration_since(created);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours} hour{} ago", plural(hours));
    }
    let days = elapsed.num_days();
    format!("{days} day{} ago", plural(days))
}

const fn plural(n: i64) -> &'static str {
    if n > 1 { "s" } else { "" }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn ago(d: Duration) -> String {
        (now() - d).to_rfc3339()
    }

    #[test]
    fn test_parse_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap();
        assert_eq!(parse_created_at("2025-03-10T09:30:00Z"), Some(expected));
        assert_eq!(parse_created_at("2025-03-10T11:30:00+02:00"), Some(expected));
        assert_eq!(parse_created_at("2025-03-10T09:30:00"), Some(expected));
        assert_eq!(parse_created_at("2025-03-10T09:30:00.123456").map(|d| d.timestamp()), Some(expected.timestamp()));
        assert_eq!(parse_created_at("2025-03-10 09:30:00"), Some(expected));
        assert_eq!(parse_created_at("yesterday"), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(format_relative_time(&ago(Duration::seconds(30)), now()), "Just now");
        assert_eq!(format_relative_time(&ago(Duration::minutes(5)), now()), "5 min ago");
        assert_eq!(format_relative_time(&ago(Duration::minutes(59)), now()), "59 min ago");
        assert_eq!(format_relative_time(&ago(Duration::minutes(60)), now()), "1 hour ago");
        assert_eq!(format_relative_time(&ago(Duration::hours(3)), now()), "3 hours ago");
        assert_eq!(format_relative_time(&ago(Duration::hours(24)), now()), "1 day ago");
        assert_eq!(format_relative_time(&ago(Duration::days(12)), now()), "12 days ago");
    }

    #[test]
    fn test_future_and_invalid() {
        assert_eq!(format_relative_time(&ago(Duration::hours(-2)), now()), "Just now");
        assert_eq!(format_relative_time("", now()), "");
        assert_eq!(format_relative_time("   ", now()), "");
        assert_eq!(format_relative_time("not a date", now()), "");
    }
}
