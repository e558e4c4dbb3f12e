//! Station roster records and their per-pass traffic counts.

use std::fmt;
use std::sync::Arc;

use geo::Point;

use crate::identifiers::StationIdentifier;

/// Trip counts touching a station within the current filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StationTraffic {
    pub departures: u32,
    pub arrivals: u32,
    pub total_traffic: u32,
}

impl StationTraffic {
    pub fn new(departures: u32, arrivals: u32) -> Self {
        Self {
            departures,
            arrivals,
            total_traffic: departures + arrivals,
        }
    }

    /// Share of traffic that departed, `None` when the station saw no trips
    pub fn departure_ratio(&self) -> Option<f64> {
        if self.total_traffic == 0 {
            None
        } else {
            Some(self.departures as f64 / self.total_traffic as f64)
        }
    }
}

impl fmt::Display for StationTraffic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} trips ({} departures, {} arrivals)",
            self.total_traffic, self.departures, self.arrivals
        )
    }
}

/// A station from the roster
///
/// Identity and location are fixed at load time; `traffic` is overwritten on
/// every aggregation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct StationRecord {
    pub id: StationIdentifier,
    pub name: Option<Arc<str>>,
    pub location: Point,
    pub traffic: StationTraffic,
}

impl StationRecord {
    pub fn new(id: StationIdentifier, longitude: f64, latitude: f64) -> Self {
        Self {
            id,
            name: None,
            location: Point::new(longitude, latitude),
            traffic: StationTraffic::default(),
        }
    }

    pub fn with_name(self, name: impl Into<Arc<str>>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }

    pub fn latitude(&self) -> f64 {
        self.location.y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traffic_total() {
        let traffic = StationTraffic::new(3, 5);
        assert_eq!(traffic.total_traffic, 8);
        assert_eq!(traffic.departure_ratio(), Some(0.375));
        assert_eq!(StationTraffic::default().departure_ratio(), None);
    }

    #[test]
    fn test_tooltip_text() {
        assert_eq!(
            StationTraffic::new(2, 1).to_string(),
            "3 trips (2 departures, 1 arrivals)"
        );
    }

    #[test]
    fn test_record_location() {
        let station = StationRecord::new("M32006".into(), -71.09415, 42.36027).with_name("MIT");
        assert_eq!(station.longitude(), -71.09415);
        assert_eq!(station.latitude(), 42.36027);
        assert_eq!(station.name.as_deref(), Some("MIT"));
        assert_eq!(station.traffic, StationTraffic::default());
    }
}
