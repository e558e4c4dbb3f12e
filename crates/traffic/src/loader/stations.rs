//! Station roster in the bike-share station feed JSON layout.

use std::io::Read;

use serde::Deserialize;
use serde_json::Value;

use crate::identifiers::StationIdentifier;
use crate::models::station::StationRecord;
use crate::models::types::{Result, TrafficError};

#[derive(Debug, Deserialize)]
struct RawStation {
    short_name: StationIdentifier,
    #[serde(default)]
    name: Option<String>,
    lon: Coordinate,
    lat: Coordinate,
}

/// Feeds disagree on whether coordinates are numbers or strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }
}

/// Parse a roster from `{"data": {"stations": [...]}}` or a bare array
pub fn parse_stations_json(json: &str) -> Result<Vec<StationRecord>> {
    let document: Value = serde_json::from_str(json).map_err(|e| TrafficError::Parse {
        row: e.line(),
        message: e.to_string(),
    })?;
    stations_from_value(document)
}

pub fn read_stations<R: Read>(reader: R) -> Result<Vec<StationRecord>> {
    let document: Value = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            TrafficError::Io(e.into())
        } else {
            TrafficError::Parse {
                row: e.line(),
                message: e.to_string(),
            }
        }
    })?;
    stations_from_value(document)
}

fn stations_from_value(document: Value) -> Result<Vec<StationRecord>> {
    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut root) => match root
            .get_mut("data")
            .and_then(|data| data.get_mut("stations"))
            .map(Value::take)
        {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(TrafficError::InvalidData(
                    "station feed has no data.stations array".into(),
                ))
            }
        },
        _ => {
            return Err(TrafficError::InvalidData(
                "station feed must be an object or an array".into(),
            ))
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(row, entry)| station_from_entry(row, entry))
        .collect()
}

fn station_from_entry(row: usize, entry: Value) -> Result<StationRecord> {
    let raw: RawStation = serde_json::from_value(entry).map_err(|e| TrafficError::Parse {
        row,
        message: e.to_string(),
    })?;

    let (Some(lon), Some(lat)) = (raw.lon.value(), raw.lat.value()) else {
        return Err(TrafficError::Parse {
            row,
            message: format!("station {} has invalid coordinates", raw.short_name),
        });
    };

    let station = StationRecord::new(raw.short_name, lon, lat);
    Ok(match raw.name {
        Some(name) if !name.is_empty() => station.with_name(name),
        _ => station,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "last_updated": 1741000000,
        "data": {
            "stations": [
                { "short_name": "M32006", "name": "MIT at Mass Ave / Amherst St",
                  "lon": -71.0936, "lat": 42.3581, "capacity": 27 },
                { "short_name": "B32016", "lon": "-71.0786", "lat": "42.3489" }
            ]
        }
    }"#;

    #[test]
    fn test_parse_feed() {
        let stations = parse_stations_json(FEED).unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id.as_str(), "M32006");
        assert_eq!(stations[0].name.as_deref(), Some("MIT at Mass Ave / Amherst St"));
        assert_eq!(stations[0].longitude(), -71.0936);
        assert_eq!(stations[1].latitude(), 42.3489);
        assert_eq!(stations[1].name, None);
    }

    #[test]
    fn test_parse_bare_array() {
        let stations =
            parse_stations_json(r#"[{ "short_name": " A1 ", "lon": 1.5, "lat": 2.5 }]"#).unwrap();
        assert_eq!(stations[0].id.as_str(), "A1");
    }

    #[test]
    fn test_read_from_reader() {
        let stations = read_stations(FEED.as_bytes()).unwrap();
        assert_eq!(stations.len(), 2);
    }

    #[test]
    fn test_invalid_feeds() {
        assert!(matches!(
            parse_stations_json(r#"{ "data": {} }"#),
            Err(TrafficError::InvalidData(_))
        ));
        assert!(matches!(
            parse_stations_json(r#"[{ "short_name": "A", "lon": "east", "lat": 1 }]"#),
            Err(TrafficError::Parse { row: 0, .. })
        ));
        assert!(matches!(
            parse_stations_json(r#"[{ "lon": 1, "lat": 1 }]"#),
            Err(TrafficError::Parse { .. })
        ));
        assert!(parse_stations_json("not json").is_err());
    }
}
