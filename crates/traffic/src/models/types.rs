//! Core data types for trip traffic.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};

use crate::identifiers::*;

/// Number of minute buckets in a day
pub const MINUTES_PER_DAY: u16 = 1440;

// ============================================================================
// Time of Day
// ============================================================================

/// Minutes elapsed since local midnight, always in `[0, 1439]`.
///
/// The date component of a timestamp is discarded: every trip is folded onto
/// a single 1440-minute day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    pub const MIDNIGHT: Self = Self(0);
    pub const NOON: Self = Self(720);

    pub fn new(minute: u16) -> Result<Self> {
        if minute < MINUTES_PER_DAY {
            Ok(Self(minute))
        } else {
            Err(TrafficError::InvalidMinute(minute as i64))
        }
    }

    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(TrafficError::InvalidData(format!(
                "{hour:02}:{minute:02} is not a valid time of day"
            )));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Wall-clock hour and minute of any chrono time value
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// US short time, e.g. `"12:00 AM"` or `"1:05 PM"`
    pub fn format_12h(self) -> String {
        let suffix = if self.hour() < 12 { "AM" } else { "PM" };
        let hour = match self.hour() % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour, self.minute(), suffix)
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for MinuteOfDay {
    type Err = TrafficError;

    /// Parses `HH:MM` (24-hour)
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TrafficError::InvalidData(format!("expected HH:MM, got {s:?}"));

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;

        Self::from_hm(hour, minute)
    }
}

// ============================================================================
// Filter State
// ============================================================================

/// The time-of-day selection driving every aggregation pass
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TimeFilter {
    /// No center selected: the full day is aggregated
    #[default]
    AnyTime,
    /// Trips within the circular window around this minute
    Around(MinuteOfDay),
}

impl TimeFilter {
    /// Slider value meaning "no time selected"
    pub const SLIDER_ANY_TIME: i32 = -1;

    /// Interpret a raw slider position (`-1` or `0..=1439`)
    pub fn from_slider(value: i32) -> Result<Self> {
        if value == Self::SLIDER_ANY_TIME {
            return Ok(Self::AnyTime);
        }

        u16::try_from(value)
            .map_err(|_| TrafficError::InvalidMinute(value as i64))
            .and_then(MinuteOfDay::new)
            .map(Self::Around)
    }

    pub fn center(&self) -> Option<MinuteOfDay> {
        match self {
            Self::AnyTime => None,
            Self::Around(minute) => Some(*minute),
        }
    }

    pub fn is_any_time(&self) -> bool {
        matches!(self, Self::AnyTime)
    }
}

impl From<MinuteOfDay> for TimeFilter {
    fn from(minute: MinuteOfDay) -> Self {
        Self::Around(minute)
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnyTime => f.write_str("(any time)"),
            Self::Around(minute) => f.write_str(&minute.format_12h()),
        }
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A single bike-share ride between two stations
///
/// Times are wall-clock timestamps; only their hour and minute take part in
/// indexing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trip {
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub start_station_id: StationIdentifier,
    pub end_station_id: StationIdentifier,
}

impl Trip {
    pub fn new(
        started_at: NaiveDateTime,
        ended_at: NaiveDateTime,
        start_station_id: StationIdentifier,
        end_station_id: StationIdentifier,
    ) -> Self {
        Self {
            started_at,
            ended_at,
            start_station_id,
            end_station_id,
        }
    }

    pub fn start_minute(&self) -> MinuteOfDay {
        MinuteOfDay::from_time(&self.started_at)
    }

    pub fn end_minute(&self) -> MinuteOfDay {
        MinuteOfDay::from_time(&self.ended_at)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TrafficError {
    #[error("Minute out of range [0, 1439]: {0}")]
    InvalidMinute(i64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrafficError>;
