//! Traffic data models, types, and traits.

pub mod station;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use station::{StationRecord, StationTraffic};
pub use traits::TrafficProvider;
pub use types::{MinuteOfDay, Result, TimeFilter, TrafficError, Trip, MINUTES_PER_DAY};
