use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::{de, Deserialize, Deserializer};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Parses a trip timestamp keeping the wall-clock time as written. Offsets in
/// RFC 3339 strings are not applied, so minute-of-day matches the source text.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

/// Minutes since midnight, `hour * 60 + minute`, ignoring the date
pub fn minutes_since_midnight(datetime: &NaiveDateTime) -> u16 {
    (datetime.hour() * 60 + datetime.minute()) as u16
}

pub fn naive_date_time_from_str<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    parse_timestamp(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {s}")))
}

#[cfg(test)]
mod test {
    use chrono::{Datelike, Timelike};

    use super::{minutes_since_midnight, parse_timestamp};

    #[test]
    fn test_parse_export_timestamp() {
        let datetime = parse_timestamp("2024-03-01 08:20:45.123").unwrap();
        assert_eq!(datetime.year(), 2024);
        assert_eq!(datetime.month(), 3);
        assert_eq!(datetime.hour(), 8);
        assert_eq!(datetime.minute(), 20);
        assert_eq!(minutes_since_midnight(&datetime), 500);
    }

    #[test]
    fn test_parse_rfc3339_keeps_wall_clock() {
        let datetime = parse_timestamp("2024-03-01T23:59:00-05:00").unwrap();
        assert_eq!(minutes_since_midnight(&datetime), 1439);
    }

    #[test]
    fn test_parse_without_seconds() {
        let datetime = parse_timestamp("2024-03-01 00:00").unwrap();
        assert_eq!(minutes_since_midnight(&datetime), 0);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
