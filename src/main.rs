use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use natal_core::{
    AnalyticEphemeris, BirthData, ChartAssembler, ChartConfig, ChartSummary, HouseSystem,
};
use tracing_subscriber::EnvFilter;

/// Compute a natal chart with the built-in analytic ephemeris.
#[derive(Debug, Parser)]
#[command(name = "natal", version, about)]
struct Cli {
    /// Birth date, YYYY-MM-DD
    #[arg(long)]
    date: String,

    /// Birth time, 24h HH:MM (taken as UT)
    #[arg(long)]
    time: String,

    /// Geographic latitude, north positive
    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,

    /// Geographic longitude, east positive
    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,

    /// placidus, equal or whole-sign; overrides the config file
    #[arg(long)]
    house_system: Option<HouseSystem>,

    /// JSON chart configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the text digest instead of the JSON chart
    #[arg(long)]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ChartConfig::from_path(path)?,
        None => ChartConfig::default(),
    };
    if let Some(system) = cli.house_system {
        config = config.with_house_system(system);
    }

    let birth = BirthData::parse(&cli.date, &cli.time, cli.latitude, cli.longitude)?;
    let ephemeris = AnalyticEphemeris::new();
    let chart = ChartAssembler::new(&ephemeris)
        .with_config(config)
        .assemble(&birth)
        .with_context(|| format!("computing chart for {} {}", cli.date, cli.time))?;

    if cli.summary {
        println!("{}", ChartSummary::from_chart(&chart));
    } else {
        println!("{}", serde_json::to_string_pretty(&chart)?);
    }
    Ok(())
}
