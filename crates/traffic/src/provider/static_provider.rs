//! In-memory traffic provider.
//!
//! Holds the station roster with an id lookup map and the temporal index
//! built once from the trip records.

use std::collections::HashMap;

use crate::identifiers::*;
use crate::index::temporal::TemporalIndex;
use crate::models::{station::StationRecord, traits::*, types::*};

/// In-memory roster and trip index
#[derive(Clone, Debug, Default)]
pub struct StaticTrafficProvider {
    // Core data
    stations: Vec<StationRecord>,
    index: TemporalIndex,

    // Lookup maps
    station_map: HashMap<StationIdentifier, usize>,
}

impl StaticTrafficProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Build provider from loaded data
    ///
    /// Station ids are the roster key: when an id repeats, the first record
    /// wins and later ones are dropped.
    pub fn from_data(stations: Vec<StationRecord>, trips: Vec<Trip>) -> Self {
        let mut roster = Vec::with_capacity(stations.len());
        let mut station_map = HashMap::with_capacity(stations.len());

        for station in stations {
            if station_map.contains_key(&station.id) {
                tracing::warn!(station = %station.id, "duplicate station id in roster, keeping first");
                continue;
            }
            station_map.insert(station.id.clone(), roster.len());
            roster.push(station);
        }

        let index = TemporalIndex::build(trips);

        tracing::info!(
            stations = roster.len(),
            trips = index.len(),
            "loaded traffic dataset"
        );

        Self {
            stations: roster,
            index,
            station_map,
        }
    }
}

impl TrafficProvider for StaticTrafficProvider {
    fn get_station(&self, id: &StationIdentifier) -> Option<&StationRecord> {
        self.station_map.get(id).map(|&i| &self.stations[i])
    }

    fn all_stations(&self) -> &[StationRecord] {
        &self.stations
    }

    fn temporal_index(&self) -> &TemporalIndex {
        &self.index
    }
}
