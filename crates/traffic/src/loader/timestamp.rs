use chrono::{DateTime, Local, NaiveDateTime};

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a trip timestamp into local wall-clock time
///
/// Timestamps without an offset are taken as already local. Offset-bearing
/// RFC 3339 timestamps are converted to the local time zone.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_naive_formats() {
        let dt = parse_timestamp("2024-03-01 08:15:42.123").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (8, 15));

        let dt = parse_timestamp("2024-03-01 23:59:00").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (23, 59));

        let dt = parse_timestamp("2024-03-01T00:04:09").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (0, 4));

        let dt = parse_timestamp(" 2024-03-01 17:30 ").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (17, 30));
    }

    #[test]
    fn test_rfc3339_converted_to_local() {
        let raw = "2024-03-01T12:00:00Z";
        let expected = DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(parse_timestamp(raw), Some(expected));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-01 00:00:00"), None);
    }
}
