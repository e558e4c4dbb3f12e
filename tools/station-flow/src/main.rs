use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use station_flow_traffic::loader::load_dataset;
use station_flow_traffic::{FlowConfig, FlowPipeline, MinuteOfDay, TimeFilter, TrafficProvider};

mod output;

use output::write_frame_geojson;

#[derive(Parser, Debug)]
#[command(
    name = "station-flow",
    author,
    version,
    about = "Aggregate bike-share station traffic around a time of day",
    long_about = "Loads a station roster (JSON station feed) and a trip-history CSV, \
                  counts the departures and arrivals of every station within a \
                  two-hour window centered on the selected time (or over the whole \
                  day), and writes the stations as GeoJSON points carrying their \
                  counts, marker radius and departure-ratio level."
)]
struct Args {
    /// Station roster JSON file
    #[arg(short, long)]
    stations: PathBuf,

    /// Trip-history CSV file
    #[arg(short, long)]
    trips: PathBuf,

    /// Center of the time window as HH:MM (24-hour); omit for any time
    #[arg(long, conflicts_with = "minute")]
    time: Option<String>,

    /// Center of the time window as minutes since midnight (0-1439)
    #[arg(long)]
    minute: Option<u16>,

    /// JSON configuration overriding window width and radius ranges
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output GeoJSON file for station features
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log the N busiest stations
    #[arg(long, default_value = "10")]
    top: usize,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn filter(&self) -> Result<TimeFilter> {
        let center = match (&self.time, self.minute) {
            (Some(time), _) => Some(
                time.parse::<MinuteOfDay>()
                    .with_context(|| format!("Invalid --time {time:?}"))?,
            ),
            (None, Some(minute)) => Some(MinuteOfDay::new(minute).context("Invalid --minute")?),
            (None, None) => None,
        };
        Ok(center.map_or(TimeFilter::AnyTime, TimeFilter::Around))
    }

    fn load_config(&self) -> Result<FlowConfig> {
        let Some(path) = &self.config else {
            return Ok(FlowConfig::default());
        };

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        FlowConfig::from_json_str(&json)
            .with_context(|| format!("Invalid config {}", path.display()))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    log::info!("=== Station Flow ===");
    log::info!("Stations: {}", args.stations.display());
    log::info!("Trips: {}", args.trips.display());

    for path in [&args.stations, &args.trips] {
        if !path.exists() {
            bail!("Input file does not exist: {}", path.display());
        }
    }

    let filter = args.filter()?;
    let config = args.load_config()?;

    // Phase 1: Load dataset
    log::info!("");
    log::info!("Phase 1: Loading dataset...");
    let provider = load_dataset(&args.stations, &args.trips).context("Failed to load dataset")?;
    log::info!(
        "  {} stations, {} trips",
        provider.all_stations().len(),
        provider.temporal_index().len()
    );

    if provider.all_stations().is_empty() {
        bail!("Station roster is empty");
    }

    // Phase 2: Aggregate
    log::info!("");
    log::info!("Phase 2: Aggregating traffic for {}...", filter);
    let mut pipeline = FlowPipeline::new(provider, config).context("Invalid configuration")?;
    let frame = pipeline.update(filter);

    if let Some(window) = frame.window {
        log::info!(
            "  Window: {} to {} (exclusive)",
            MinuteOfDay::new(window.start())?,
            MinuteOfDay::new(window.end())?
        );
    }
    log::info!(
        "  {} departures, {} arrivals counted",
        frame.summary.departures,
        frame.summary.arrivals
    );
    if frame.summary.unmatched_departures > 0 || frame.summary.unmatched_arrivals > 0 {
        log::warn!(
            "  {} departures and {} arrivals reference stations missing from the roster",
            frame.summary.unmatched_departures,
            frame.summary.unmatched_arrivals
        );
    }

    if args.top > 0 {
        log::info!("");
        log::info!("Busiest stations:");
        for mark in frame.busiest(args.top) {
            let name = mark.name.as_deref().unwrap_or("");
            log::info!(
                "  {:<8} {:<40} {} (radius {:.1}, flow {})",
                mark.id.as_str(),
                name,
                mark.tooltip(),
                mark.radius,
                mark.flow.value()
            );
        }
    }

    // Phase 3: Write output
    if let Some(output_path) = &args.output {
        log::info!("");
        log::info!("Phase 3: Writing output...");
        write_frame_geojson(&frame, output_path)
            .context("Failed to write station GeoJSON")?;
        log::info!("Output written to: {}", output_path.display());
    }

    log::info!("Done!");

    Ok(())
}
