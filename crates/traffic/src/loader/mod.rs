//! Dataset loading: station roster JSON and trip CSV.
//!
//! Any failure here is terminal for the dataset; the core is only ever
//! handed fully parsed data.

pub mod stations;
pub mod timestamp;
pub mod trips;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use stations::{parse_stations_json, read_stations};
pub use timestamp::parse_timestamp;
pub use trips::{parse_trips_csv, read_trips};

use crate::models::types::Result;
use crate::provider::StaticTrafficProvider;

/// Load both files and build the provider
pub fn load_dataset(stations_path: &Path, trips_path: &Path) -> Result<StaticTrafficProvider> {
    let stations = read_stations(BufReader::new(File::open(stations_path)?))?;
    let trips = read_trips(BufReader::new(File::open(trips_path)?))?;

    Ok(StaticTrafficProvider::from_data(stations, trips))
}
