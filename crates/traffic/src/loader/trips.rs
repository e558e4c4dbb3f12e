//! Trip records from the monthly trip-history CSV export.

use std::io::Read;

use serde::Deserialize;

use crate::identifiers::StationIdentifier;
use crate::loader::timestamp::parse_timestamp;
use crate::models::types::{Result, TrafficError, Trip};

/// Columns the loader reads; any others are ignored
#[derive(Debug, Deserialize)]
struct RawTrip {
    started_at: String,
    ended_at: String,
    start_station_id: StationIdentifier,
    end_station_id: StationIdentifier,
}

/// Read every trip from a CSV with a header row
///
/// Rows are numbered from 1 for the header, so the first record is row 2.
/// The first malformed row aborts the load.
pub fn read_trips<R: Read>(reader: R) -> Result<Vec<Trip>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut trips = Vec::new();

    for (record_index, record) in csv_reader.deserialize::<RawTrip>().enumerate() {
        let row = record_index + 2;
        let raw = record.map_err(|e| csv_error(row, e))?;
        trips.push(trip_from_raw(row, raw)?);
    }

    tracing::debug!(trips = trips.len(), "parsed trip csv");
    Ok(trips)
}

pub fn parse_trips_csv(csv: &str) -> Result<Vec<Trip>> {
    read_trips(csv.as_bytes())
}

fn trip_from_raw(row: usize, raw: RawTrip) -> Result<Trip> {
    let timestamp = |column: &str, value: &str| {
        parse_timestamp(value).ok_or_else(|| TrafficError::Parse {
            row,
            message: format!("invalid {column} timestamp {value:?}"),
        })
    };

    Ok(Trip::new(
        timestamp("started_at", &raw.started_at)?,
        timestamp("ended_at", &raw.ended_at)?,
        raw.start_station_id,
        raw.end_station_id,
    ))
}

fn csv_error(row: usize, error: csv::Error) -> TrafficError {
    if error.is_io_error() {
        match error.into_kind() {
            csv::ErrorKind::Io(io) => TrafficError::Io(io),
            kind => TrafficError::Parse {
                row,
                message: format!("{kind:?}"),
            },
        }
    } else {
        TrafficError::Parse {
            row,
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
ride_id,rideable_type,started_at,ended_at,start_station_name,start_station_id,end_station_name,end_station_id,start_lat,start_lng,end_lat,end_lng,member_casual
F96D5A74A3E41399,electric_bike,2024-03-01 11:40:12.290,2024-03-01 11:45:45.000,MIT at Mass Ave,M32006,Central Square,M32011,42.35,-71.09,42.36,-71.10,member
A1B2C3D4E5F60718,classic_bike,2024-03-31 23:58:01,2024-04-01 00:07:30,Central Square,M32011,,,42.36,-71.10,,,casual
";

    #[test]
    fn test_read_export() {
        let trips = parse_trips_csv(EXPORT).unwrap();

        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].start_minute().get(), 700);
        assert_eq!(trips[0].end_minute().get(), 705);
        assert_eq!(trips[0].start_station_id.as_str(), "M32006");
        assert_eq!(trips[0].end_station_id.as_str(), "M32011");

        // Crosses midnight: the date is dropped
        assert_eq!(trips[1].start_minute().get(), 1438);
        assert_eq!(trips[1].end_minute().get(), 7);
        assert!(trips[1].end_station_id.is_empty());
    }

    #[test]
    fn test_minimal_columns() {
        let trips = parse_trips_csv(
            "started_at,ended_at,start_station_id,end_station_id\n\
             2024-03-01 00:05:00,2024-03-01 00:20:00,A,B\n",
        )
        .unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].start_minute().get(), 5);
        assert_eq!(trips[0].end_station_id.as_str(), "B");
    }

    #[test]
    fn test_bad_timestamp_names_row() {
        let err = parse_trips_csv(
            "started_at,ended_at,start_station_id,end_station_id\n\
             2024-03-01 00:05:00,2024-03-01 00:20:00,A,B\n\
             soon,2024-03-01 00:20:00,A,B\n",
        )
        .unwrap_err();

        match err {
            TrafficError::Parse { row, message } => {
                assert_eq!(row, 3);
                assert!(message.contains("started_at"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let result = parse_trips_csv(
            "started_at,ended_at,start_station_id\n\
             2024-03-01 00:05:00,2024-03-01 00:20:00,A\n",
        );
        assert!(matches!(result, Err(TrafficError::Parse { row: 2, .. })));
    }
}
