//! Circular time-window queries over the temporal index.
//!
//! A window around center `c` with half-width `w` covers the half-open
//! minute range `[c - w, c + w)` taken modulo one day: with the default
//! `w = 60`, minute `c - 60` is included and `c + 60` is not. When the range
//! crosses midnight it is split into `[start, 1440)` followed by `[0, end)`.

use std::ops::Range;

use crate::index::temporal::{TemporalIndex, TripRole};
use crate::models::types::{MinuteOfDay, TimeFilter, Trip, MINUTES_PER_DAY};

/// Default half-width of the circular window, in minutes
pub const DEFAULT_HALF_WIDTH: u16 = 60;

const DAY: usize = MINUTES_PER_DAY as usize;

/// A contiguous minute-of-day range that may wrap past `1439 -> 0`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CircularWindow {
    start: u16,
    end: u16,
}

impl CircularWindow {
    pub fn around(center: MinuteOfDay, half_width: u16) -> Self {
        let day = MINUTES_PER_DAY as i32;
        let center = center.get() as i32;
        let half_width = half_width as i32;

        Self {
            start: (center - half_width).rem_euclid(day) as u16,
            end: ((center + half_width) % day) as u16,
        }
    }

    /// The window selected by a filter, `None` meaning the whole day
    pub fn for_filter(filter: TimeFilter, half_width: u16) -> Option<Self> {
        filter
            .center()
            .map(|center| Self::around(center, half_width))
    }

    /// First included minute
    pub fn start(&self) -> u16 {
        self.start
    }

    /// First excluded minute
    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn wraps(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, minute: MinuteOfDay) -> bool {
        let minute = minute.get();
        if self.wraps() {
            minute >= self.start || minute < self.end
        } else {
            minute >= self.start && minute < self.end
        }
    }

    /// Number of minutes covered
    pub fn span(&self) -> u16 {
        if self.wraps() {
            MINUTES_PER_DAY - self.start + self.end
        } else {
            self.end - self.start
        }
    }

    /// Bucket ranges in query order; the second is empty unless the window wraps
    pub fn bucket_ranges(&self) -> [Range<usize>; 2] {
        let (start, end) = (self.start as usize, self.end as usize);
        if self.wraps() {
            [start..DAY, 0..end]
        } else {
            [start..end, 0..0]
        }
    }
}

impl TemporalIndex {
    /// Trips of one role whose bucket falls in `window`, or every trip when
    /// `window` is `None`
    ///
    /// Buckets are visited in ascending minute order (starting at the window
    /// start when it wraps), and trips within a bucket keep insertion order.
    pub fn query(
        &self,
        role: TripRole,
        window: Option<CircularWindow>,
    ) -> impl Iterator<Item = &Trip> + '_ {
        let ranges = match window {
            Some(window) => window.bucket_ranges(),
            None => [0..DAY, 0..0],
        };
        let buckets = self.buckets(role);

        ranges
            .into_iter()
            .flat_map(move |range| buckets[range].iter().flatten())
            .map(move |&position| self.trip_at(position))
    }

    /// Departures selected by `filter`
    pub fn departures_for(&self, filter: TimeFilter, half_width: u16) -> Vec<&Trip> {
        self.query(
            TripRole::Departure,
            CircularWindow::for_filter(filter, half_width),
        )
        .collect()
    }

    /// Arrivals selected by `filter`
    pub fn arrivals_for(&self, filter: TimeFilter, half_width: u16) -> Vec<&Trip> {
        self.query(
            TripRole::Arrival,
            CircularWindow::for_filter(filter, half_width),
        )
        .collect()
    }
}
