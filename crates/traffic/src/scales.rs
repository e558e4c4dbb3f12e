//! Visual encodings derived from aggregated station traffic.
//!
//! Both scales are stateless and rebuilt on every aggregation pass. Their
//! conventions follow d3's `scaleSqrt` (marker radius) and `scaleQuantize`
//! (departure/arrival color mix).

use crate::models::station::{StationRecord, StationTraffic};
use crate::models::types::{Result, TrafficError};

/// Output interval of the size scale, in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct RadiusRange {
    pub min: f64,
    pub max: f64,
}

impl RadiusRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

// ============================================================================
// Size Scale
// ============================================================================

/// Square-root scale from total traffic to marker radius
///
/// Keeps marker *area* proportional to traffic. The domain is
/// `[0, max_traffic]`. When every station has zero traffic the domain is
/// degenerate and every input maps to the bottom of the range, so a quiet
/// window draws every marker at its smallest size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
    domain_max: f64,
    range: RadiusRange,
}

impl SqrtScale {
    pub fn new(domain_max: f64, range: RadiusRange) -> Self {
        Self {
            domain_max: domain_max.max(0.0),
            range,
        }
    }

    /// Domain taken from the busiest station
    pub fn for_stations(stations: &[StationRecord], range: RadiusRange) -> Self {
        let max = stations
            .iter()
            .map(|s| s.traffic.total_traffic)
            .max()
            .unwrap_or(0);
        Self::new(max as f64, range)
    }

    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    pub fn range(&self) -> RadiusRange {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        let span = self.domain_max.sqrt();
        if span == 0.0 {
            return self.range.min;
        }
        let t = value.max(0.0).sqrt() / span;
        self.range.min + t * (self.range.max - self.range.min)
    }

    pub fn radius(&self, traffic: &StationTraffic) -> f64 {
        self.apply(traffic.total_traffic as f64)
    }
}

// ============================================================================
// Quantize Scale
// ============================================================================

/// Maps a continuous domain onto evenly sized segments, one per output value
///
/// A value equal to a segment threshold falls into the upper segment; values
/// outside the domain clamp to the first or last output.
#[derive(Clone, Debug, PartialEq)]
pub struct QuantizeScale<T> {
    domain: (f64, f64),
    thresholds: Vec<f64>,
    range: Vec<T>,
}

impl<T> QuantizeScale<T> {
    pub fn new(domain: (f64, f64), range: Vec<T>) -> Result<Self> {
        if range.is_empty() {
            return Err(TrafficError::InvalidConfig(
                "quantize scale needs at least one output value".into(),
            ));
        }
        if !(domain.0.is_finite() && domain.1.is_finite()) || domain.0 >= domain.1 {
            return Err(TrafficError::InvalidConfig(format!(
                "quantize domain must be an increasing finite interval, got {domain:?}"
            )));
        }
        Ok(Self::with_range(domain, range))
    }

    fn with_range(domain: (f64, f64), range: Vec<T>) -> Self {
        let segments = range.len() as f64;
        let (x0, x1) = domain;
        let thresholds = (1..range.len())
            .map(|i| x0 + i as f64 * (x1 - x0) / segments)
            .collect();

        Self {
            domain,
            thresholds,
            range,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// `None` only for NaN input
    pub fn apply(&self, value: f64) -> Option<&T> {
        if value.is_nan() {
            return None;
        }
        let segment = self.thresholds.partition_point(|&t| t <= value);
        self.range.get(segment)
    }
}

// ============================================================================
// Flow Scale
// ============================================================================

/// Quantized departure ratio driving the marker color gradient
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowLevel {
    /// Departure ratio below 1/3
    ArrivalHeavy,
    /// Departure ratio in `[1/3, 2/3)`, or no traffic at all
    Balanced,
    /// Departure ratio of 2/3 or more
    DepartureHeavy,
}

impl FlowLevel {
    pub fn value(self) -> f64 {
        match self {
            Self::ArrivalHeavy => 0.0,
            Self::Balanced => 0.5,
            Self::DepartureHeavy => 1.0,
        }
    }
}

/// Three-level quantize scale over the departure ratio `[0, 1]`
#[derive(Clone, Debug, PartialEq)]
pub struct FlowScale {
    scale: QuantizeScale<FlowLevel>,
}

impl FlowScale {
    pub fn new() -> Self {
        Self {
            scale: QuantizeScale::with_range(
                (0.0, 1.0),
                vec![
                    FlowLevel::ArrivalHeavy,
                    FlowLevel::Balanced,
                    FlowLevel::DepartureHeavy,
                ],
            ),
        }
    }

    pub fn level_for_ratio(&self, ratio: f64) -> FlowLevel {
        self.scale.apply(ratio).copied().unwrap_or(FlowLevel::Balanced)
    }

    /// Stations without traffic have no ratio and get the midpoint level
    pub fn level(&self, traffic: &StationTraffic) -> FlowLevel {
        traffic
            .departure_ratio()
            .map_or(FlowLevel::Balanced, |ratio| self.level_for_ratio(ratio))
    }
}

impl Default for FlowScale {
    fn default() -> Self {
        Self::new()
    }
}
