use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use route_planner::geocode::{NominatimClient, NominatimConfig};
use route_planner::osrm::{OsrmClient, OsrmConfig};
use route_planner::planner::RoutePlanner;

/// Plan a driving route between two place names.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Start location, e.g. "Brandenburg Gate, Berlin".
    start: String,

    /// End location.
    end: String,

    #[arg(long, default_value = "https://router.project-osrm.org")]
    osrm_url: String,

    /// OSRM profile segment of the route URL.
    #[arg(long, default_value = "driving")]
    profile: String,

    #[arg(long, default_value = "https://nominatim.openstreetmap.org")]
    nominatim_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = Output::Summary)]
    output: Output,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    /// One-line distance and duration.
    Summary,
    /// Layer JSON for the map.
    Layer,
    /// `[minX, minY, maxX, maxY]` extent.
    Bounds,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let geocoder = NominatimClient::new(NominatimConfig {
        base_url: cli.nominatim_url,
        timeout_secs: cli.timeout_secs,
        ..NominatimConfig::default()
    })
    .context("building geocoding client")?;
    let router = OsrmClient::new(OsrmConfig {
        base_url: cli.osrm_url,
        profile: cli.profile,
        timeout_secs: cli.timeout_secs,
        ..OsrmConfig::default()
    })
    .context("building routing client")?;

    let planned = RoutePlanner::new(geocoder, router).plan(&cli.start, &cli.end)?;

    match cli.output {
        Output::Summary => println!("{}", planned.summary),
        Output::Layer => println!("{}", serde_json::to_string_pretty(&planned.layer)?),
        Output::Bounds => println!("{}", serde_json::to_string(&planned.bounds.to_array())?),
    }
    Ok(())
}
