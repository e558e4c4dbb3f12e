//! Per-station rollup of filtered trips.

use std::collections::HashMap;
use std::hash::Hash;

use crate::identifiers::StationIdentifier;
use crate::models::station::{StationRecord, StationTraffic};
use crate::models::types::Trip;

/// Outcome of one aggregation pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AggregationSummary {
    /// Filtered departures attributed to a roster station
    pub departures: u32,
    /// Filtered arrivals attributed to a roster station
    pub arrivals: u32,
    /// Filtered departures whose start station is not in the roster
    pub unmatched_departures: u32,
    /// Filtered arrivals whose end station is not in the roster
    pub unmatched_arrivals: u32,
}

impl AggregationSummary {
    pub fn total_traffic(&self) -> u32 {
        self.departures + self.arrivals
    }
}

/// Group `items` by `key` and count each group
pub fn rollup<I, K, F>(items: I, key: F) -> HashMap<K, u32>
where
    I: IntoIterator,
    K: Eq + Hash,
    F: Fn(I::Item) -> K,
{
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(key(item)).or_insert(0) += 1;
    }
    counts
}

/// Overwrite the traffic of every station with counts from the filtered trips
///
/// Departures are counted against `start_station_id` and arrivals against
/// `end_station_id`. The roster is never grown or shrunk: trips naming a
/// station that is not in `stations` are left out of every count. Running
/// twice with the same inputs yields the same records.
pub fn aggregate<'a, D, A>(
    stations: &mut [StationRecord],
    departures: D,
    arrivals: A,
) -> AggregationSummary
where
    D: IntoIterator<Item = &'a Trip>,
    A: IntoIterator<Item = &'a Trip>,
{
    let departure_counts = rollup(departures, |trip| &trip.start_station_id);
    let arrival_counts = rollup(arrivals, |trip| &trip.end_station_id);

    let mut summary = AggregationSummary::default();

    for station in stations.iter_mut() {
        let traffic = StationTraffic::new(
            count_for(&departure_counts, &station.id),
            count_for(&arrival_counts, &station.id),
        );
        summary.departures += traffic.departures;
        summary.arrivals += traffic.arrivals;
        station.traffic = traffic;
    }

    summary.unmatched_departures = departure_counts
        .values()
        .sum::<u32>()
        .saturating_sub(summary.departures);
    summary.unmatched_arrivals = arrival_counts
        .values()
        .sum::<u32>()
        .saturating_sub(summary.arrivals);

    if summary.unmatched_departures > 0 || summary.unmatched_arrivals > 0 {
        tracing::debug!(
            unmatched_departures = summary.unmatched_departures,
            unmatched_arrivals = summary.unmatched_arrivals,
            "trips reference stations missing from the roster"
        );
    }

    summary
}

fn count_for(counts: &HashMap<&StationIdentifier, u32>, id: &StationIdentifier) -> u32 {
    counts.get(id).copied().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::temporal::tests::trip;

    fn roster(ids: &[&str]) -> Vec<StationRecord> {
        ids.iter()
            .map(|id| StationRecord::new((*id).into(), -71.0, 42.3))
            .collect()
    }

    fn traffic_of(stations: &[StationRecord]) -> Vec<(String, StationTraffic)> {
        stations
            .iter()
            .map(|s| (s.id.to_string(), s.traffic))
            .collect()
    }

    #[test]
    fn test_rollup_counts() {
        let words = ["a", "b", "a", "c", "a"];
        let counts = rollup(words.iter(), |w| *w);
        assert_eq!(counts.get("a"), Some(&3));
        assert_eq!(counts.get("b"), Some(&1));
        assert_eq!(counts.get("z"), None);
    }

    #[test]
    fn test_aggregate_counts() {
        let trips = vec![
            trip(700, "A", 705, "B"),
            trip(710, "A", 720, "C"),
            trip(730, "B", 740, "A"),
        ];
        let mut stations = roster(&["A", "B", "C", "D"]);

        let summary = aggregate(&mut stations, &trips, &trips);

        assert_eq!(stations[0].traffic, StationTraffic::new(2, 1));
        assert_eq!(stations[1].traffic, StationTraffic::new(1, 1));
        assert_eq!(stations[2].traffic, StationTraffic::new(0, 1));
        assert_eq!(stations[3].traffic, StationTraffic::default());
        assert_eq!(summary.total_traffic(), 6);

        for station in &stations {
            assert_eq!(
                station.traffic.total_traffic,
                station.traffic.departures + station.traffic.arrivals
            );
        }
    }

    #[test]
    fn test_unknown_stations_are_excluded() {
        let trips = vec![trip(700, "A", 705, "ghost"), trip(700, "", 705, "A")];
        let mut stations = roster(&["A"]);

        let summary = aggregate(&mut stations, &trips, &trips);

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].traffic, StationTraffic::new(1, 1));
        assert_eq!(summary.unmatched_departures, 1);
        assert_eq!(summary.unmatched_arrivals, 1);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let trips = vec![trip(100, "A", 200, "B"), trip(300, "B", 400, "B")];
        let mut stations = roster(&["A", "B"]);

        let first = aggregate(&mut stations, &trips, &trips);
        let after_first = traffic_of(&stations);
        let second = aggregate(&mut stations, &trips, &trips);

        assert_eq!(first, second);
        assert_eq!(after_first, traffic_of(&stations));
    }

    #[test]
    fn test_aggregate_overwrites_previous_pass() {
        let trips = vec![trip(100, "A", 200, "B")];
        let mut stations = roster(&["A", "B"]);

        aggregate(&mut stations, &trips, &trips);
        aggregate(&mut stations, std::iter::empty(), std::iter::empty());

        assert!(stations.iter().all(|s| s.traffic == StationTraffic::default()));
        assert_eq!(stations.len(), 2);
    }
}
