//! Core traits for traffic data.
//!
//! The pipeline only needs a station roster and a built temporal index.
//! Implementations can be in-memory or backed by another store.

use crate::identifiers::StationIdentifier;
use crate::index::temporal::TemporalIndex;
use crate::models::station::StationRecord;

/// Provider of a loaded dataset: the roster and the indexed trips
pub trait TrafficProvider: Send + Sync {
    // ---- Lookups ----
    fn get_station(&self, id: &StationIdentifier) -> Option<&StationRecord>;

    // ---- Collections ----

    /// Roster in load order; ids are unique
    fn all_stations(&self) -> &[StationRecord];

    /// Trips bucketed by minute of day
    fn temporal_index(&self) -> &TemporalIndex;
}
