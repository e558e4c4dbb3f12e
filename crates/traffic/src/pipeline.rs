//! Synchronous recomputation run on every filter change.
//!
//! `update` performs one full pass: window query over both bucket arrays,
//! per-station rollup into the owned roster, then the size and flow scales.
//! Nothing is cached between passes apart from the station records
//! themselves, whose traffic fields are overwritten each time.

use std::sync::Arc;

use geo::Point;

use crate::aggregate::{aggregate, AggregationSummary};
use crate::config::FlowConfig;
use crate::identifiers::StationIdentifier;
use crate::index::temporal::TripRole;
use crate::index::window::CircularWindow;
use crate::models::station::{StationRecord, StationTraffic};
use crate::models::traits::TrafficProvider;
use crate::models::types::{Result, TimeFilter};
use crate::scales::{FlowLevel, FlowScale, SqrtScale};

/// Render-ready encoding of one station, keyed by its id
#[derive(Clone, Debug, PartialEq)]
pub struct StationMark {
    pub id: StationIdentifier,
    pub name: Option<Arc<str>>,
    pub location: Point,
    pub traffic: StationTraffic,
    pub radius: f64,
    pub flow: FlowLevel,
}

impl StationMark {
    pub fn tooltip(&self) -> String {
        self.traffic.to_string()
    }
}

/// Output of one pipeline pass
#[derive(Clone, Debug)]
pub struct FlowFrame {
    pub filter: TimeFilter,
    /// Human-readable filter state, e.g. `"(any time)"` or `"8:30 AM"`
    pub label: String,
    pub window: Option<CircularWindow>,
    pub summary: AggregationSummary,
    pub size_scale: SqrtScale,
    /// One mark per roster station, in roster order
    pub marks: Vec<StationMark>,
}

impl FlowFrame {
    pub fn mark(&self, id: &StationIdentifier) -> Option<&StationMark> {
        self.marks.iter().find(|mark| &mark.id == id)
    }

    /// Marks ordered by descending total traffic, ties by id
    pub fn busiest(&self, n: usize) -> Vec<&StationMark> {
        let mut marks: Vec<&StationMark> = self.marks.iter().collect();
        marks.sort_by(|a, b| {
            b.traffic
                .total_traffic
                .cmp(&a.traffic.total_traffic)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        marks.truncate(n);
        marks
    }
}

pub struct FlowPipeline<P> {
    provider: P,
    config: FlowConfig,
    stations: Vec<StationRecord>,
    flow_scale: FlowScale,
    filter: TimeFilter,
}

impl<P: TrafficProvider> FlowPipeline<P> {
    pub fn new(provider: P, config: FlowConfig) -> Result<Self> {
        config.validate()?;
        let stations = provider.all_stations().to_vec();

        Ok(Self {
            provider,
            config,
            stations,
            flow_scale: FlowScale::new(),
            filter: TimeFilter::AnyTime,
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Filter applied by the most recent pass
    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    /// Station records as of the most recent pass
    ///
    /// These are the only records whose `traffic` is current; the provider's
    /// roster is never written to.
    pub fn stations(&self) -> &[StationRecord] {
        &self.stations
    }

    pub fn update(&mut self, filter: TimeFilter) -> FlowFrame {
        let index = self.provider.temporal_index();
        let window = CircularWindow::for_filter(filter, self.config.window_half_width);

        let summary = aggregate(
            &mut self.stations,
            index.query(TripRole::Departure, window),
            index.query(TripRole::Arrival, window),
        );

        let size_scale = SqrtScale::for_stations(&self.stations, self.config.radius_range(filter));
        let marks = self
            .stations
            .iter()
            .map(|station| StationMark {
                id: station.id.clone(),
                name: station.name.clone(),
                location: station.location,
                traffic: station.traffic,
                radius: size_scale.radius(&station.traffic),
                flow: self.flow_scale.level(&station.traffic),
            })
            .collect();

        tracing::debug!(
            filter = %filter,
            departures = summary.departures,
            arrivals = summary.arrivals,
            "recomputed station traffic"
        );

        self.filter = filter;

        FlowFrame {
            filter,
            label: filter.to_string(),
            window,
            summary,
            size_scale,
            marks,
        }
    }

    /// Run a pass from a raw slider position (`-1` for any time)
    pub fn update_from_slider(&mut self, value: i32) -> Result<FlowFrame> {
        TimeFilter::from_slider(value).map(|filter| self.update(filter))
    }
}
