//! # station-flow-traffic
//!
//! Time-of-day traffic aggregation for bike-share stations.
//!
//! ## Features
//!
//! - **Temporal index**: trips pre-binned into 1440 per-minute buckets for
//!   departures and arrivals
//! - **Circular windows**: half-open windows around a center minute that
//!   wrap past midnight
//! - **Station rollup**: departure, arrival and total counts per station
//! - **Visual encodings**: square-root radius scale and quantized
//!   departure-ratio levels
//! - **Loader** (feature `loader`): station feed JSON and trip-history CSV
//!
//! ## Example
//!
//! ```
//! use station_flow_traffic::prelude::*;
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let trip = Trip::new(
//!     day.and_hms_opt(11, 40, 0).unwrap(),
//!     day.and_hms_opt(11, 45, 0).unwrap(),
//!     StationIdentifier::new("A"),
//!     StationIdentifier::new("B"),
//! );
//!
//! let stations = vec![
//!     StationRecord::new(StationIdentifier::new("A"), -71.094, 42.360),
//!     StationRecord::new(StationIdentifier::new("B"), -71.101, 42.365),
//! ];
//!
//! let provider = StaticTrafficProvider::from_data(stations, vec![trip]);
//! let mut pipeline = FlowPipeline::new(provider, FlowConfig::default()).unwrap();
//!
//! // 11:40 AM: window [10:40, 12:40)
//! let frame = pipeline.update(TimeFilter::from_slider(700).unwrap());
//! assert_eq!(frame.label, "11:40 AM");
//! assert_eq!(frame.marks[0].traffic.departures, 1);
//! assert_eq!(frame.marks[1].traffic.arrivals, 1);
//!
//! // 3:00 PM: the trip falls outside the window
//! let frame = pipeline.update(TimeFilter::from_slider(900).unwrap());
//! assert_eq!(frame.summary.total_traffic(), 0);
//! ```

pub mod aggregate;
pub mod config;
pub mod identifiers;
pub mod index;
pub mod models;
pub mod pipeline;
pub mod provider;
pub mod scales;

#[cfg(feature = "loader")]
pub mod loader;

// Re-exports for convenience
pub mod prelude {
    pub use crate::aggregate::{aggregate, rollup, AggregationSummary};
    pub use crate::config::FlowConfig;
    pub use crate::identifiers::*;
    pub use crate::index::{CircularWindow, TemporalIndex, TripRole};
    pub use crate::models::{station::*, traits::*, types::*};
    pub use crate::pipeline::{FlowFrame, FlowPipeline, StationMark};
    pub use crate::provider::StaticTrafficProvider;
    pub use crate::scales::{FlowLevel, FlowScale, QuantizeScale, RadiusRange, SqrtScale};
}

pub use prelude::*;
