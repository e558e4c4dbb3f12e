//! Per-minute bucketing of trips by departure and arrival time.
//!
//! The index owns every trip in an arena and keeps two fixed arrays of 1440
//! buckets holding arena positions. Bucket access is a direct array index;
//! nothing is hashed or sorted.

use crate::models::types::{MinuteOfDay, Trip, MINUTES_PER_DAY};

/// Which timestamp of a trip a bucket is keyed on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TripRole {
    /// Keyed on `started_at`, counted against `start_station_id`
    Departure,
    /// Keyed on `ended_at`, counted against `end_station_id`
    Arrival,
}

/// Trips partitioned into one departure and one arrival bucket per minute of day
///
/// Built once per dataset and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct TemporalIndex {
    trips: Vec<Trip>,
    departures: Box<[Vec<usize>]>,
    arrivals: Box<[Vec<usize>]>,
}

impl TemporalIndex {
    pub fn build(trips: impl IntoIterator<Item = Trip>) -> Self {
        let trips: Vec<Trip> = trips.into_iter().collect();

        let mut departures = empty_buckets();
        let mut arrivals = empty_buckets();

        for (position, trip) in trips.iter().enumerate() {
            departures[trip.start_minute().index()].push(position);
            arrivals[trip.end_minute().index()].push(position);
        }

        tracing::debug!(trips = trips.len(), "built temporal index");

        Self {
            trips,
            departures,
            arrivals,
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// All indexed trips in load order
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Trips in a single bucket, in insertion order
    pub fn bucket(&self, role: TripRole, minute: MinuteOfDay) -> impl Iterator<Item = &Trip> + '_ {
        self.buckets(role)[minute.index()]
            .iter()
            .map(move |&position| &self.trips[position])
    }

    pub fn bucket_len(&self, role: TripRole, minute: MinuteOfDay) -> usize {
        self.buckets(role)[minute.index()].len()
    }

    pub fn departures_at(&self, minute: MinuteOfDay) -> impl Iterator<Item = &Trip> + '_ {
        self.bucket(TripRole::Departure, minute)
    }

    pub fn arrivals_at(&self, minute: MinuteOfDay) -> impl Iterator<Item = &Trip> + '_ {
        self.bucket(TripRole::Arrival, minute)
    }

    pub(crate) fn buckets(&self, role: TripRole) -> &[Vec<usize>] {
        match role {
            TripRole::Departure => &self.departures,
            TripRole::Arrival => &self.arrivals,
        }
    }

    pub(crate) fn trip_at(&self, position: usize) -> &Trip {
        &self.trips[position]
    }
}

impl Default for TemporalIndex {
    fn default() -> Self {
        Self::build(Vec::new())
    }
}

impl FromIterator<Trip> for TemporalIndex {
    fn from_iter<I: IntoIterator<Item = Trip>>(iter: I) -> Self {
        Self::build(iter)
    }
}

fn empty_buckets() -> Box<[Vec<usize>]> {
    (0..MINUTES_PER_DAY).map(|_| Vec::new()).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    pub(crate) fn at_minute(minute: u16) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt((minute / 60) as u32, (minute % 60) as u32, 17)
            .unwrap()
    }

    pub(crate) fn trip(start: u16, from: &str, end: u16, to: &str) -> Trip {
        Trip::new(at_minute(start), at_minute(end), from.into(), to.into())
    }

    fn minute(m: u16) -> MinuteOfDay {
        MinuteOfDay::new(m).unwrap()
    }

    #[test]
    fn test_empty_index() {
        let index = TemporalIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.buckets(TripRole::Departure).len(), 1440);
        assert_eq!(index.buckets(TripRole::Arrival).len(), 1440);
    }

    #[test]
    fn test_bucket_completeness() {
        let trips = vec![
            trip(0, "A", 12, "B"),
            trip(700, "A", 705, "B"),
            trip(1439, "C", 3, "A"),
            trip(700, "B", 700, "B"),
        ];
        let index = TemporalIndex::build(trips.clone());

        for (position, trip) in trips.iter().enumerate() {
            let departure_hits = index
                .buckets(TripRole::Departure)
                .iter()
                .enumerate()
                .filter(|(_, bucket)| bucket.contains(&position))
                .map(|(m, _)| m)
                .collect::<Vec<_>>();
            let arrival_hits = index
                .buckets(TripRole::Arrival)
                .iter()
                .enumerate()
                .filter(|(_, bucket)| bucket.contains(&position))
                .map(|(m, _)| m)
                .collect::<Vec<_>>();

            assert_eq!(departure_hits, vec![trip.start_minute().index()]);
            assert_eq!(arrival_hits, vec![trip.end_minute().index()]);
        }
    }

    #[test]
    fn test_bucket_insertion_order() {
        let index: TemporalIndex = vec![
            trip(700, "first", 800, "X"),
            trip(701, "other", 800, "X"),
            trip(700, "second", 801, "X"),
        ]
        .into_iter()
        .collect();

        let ids: Vec<_> = index
            .departures_at(minute(700))
            .map(|t| t.start_station_id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert_eq!(index.bucket_len(TripRole::Arrival, minute(800)), 2);
        assert_eq!(index.arrivals_at(minute(801)).count(), 1);
        assert_eq!(index.arrivals_at(minute(802)).count(), 0);
    }
}
