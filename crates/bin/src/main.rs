//! Ratescreen CLI binary.
//!
//! Loads one CSV per label and screens interest rates against GDP growth.

mod render;

use clap::{Parser, Subcommand};
use ratescreen::{Screen, ScreenConfig, YOY_GROWTH, append_growth, correlate_with_lags};
use ratescreen_data::{CsvLoaderConfig, CsvPanelLoader, PanelLoader, PanelStore};
use render::{StdoutRenderer, correlations_json, outcome_json};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ratescreen")]
#[command(about = "Ratescreen: interest rates against GDP growth", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full screen: growth, lag correlations, tests and differencing
    Screen {
        /// Directory holding `<label>/<label>_data.csv`
        #[arg(long)]
        data_dir: PathBuf,

        /// Labels to screen
        #[arg(long, num_args = 1.., required = true)]
        labels: Vec<String>,

        /// Largest lag in both directions
        #[arg(long)]
        max_lag: Option<usize>,

        /// Substring selecting series to difference (repeatable)
        #[arg(long = "target")]
        targets: Vec<String>,

        /// Differencing method (percent or abs)
        #[arg(long)]
        method: Option<String>,

        /// Rebuild the report after differencing
        #[arg(long)]
        rerun: bool,

        /// JSON configuration file; flags override its fields
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format (json or text)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Correlate growth with the lagged rate only
    Correlate {
        /// Directory holding `<label>/<label>_data.csv`
        #[arg(long)]
        data_dir: PathBuf,

        /// Labels to correlate
        #[arg(long, num_args = 1.., required = true)]
        labels: Vec<String>,

        /// Largest lag in both directions
        #[arg(long, default_value = "4")]
        max_lag: usize,

        /// Output format (json or text)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            data_dir,
            labels,
            max_lag,
            targets,
            method,
            rerun,
            config,
            format,
        } => {
            let mut config = match config {
                Some(path) => ScreenConfig::from_json(&std::fs::read_to_string(path)?)?,
                None => ScreenConfig::default(),
            };
            if let Some(max_lag) = max_lag {
                config.max_lag = max_lag;
            }
            if !targets.is_empty() {
                config.targets = targets;
            }
            if let Some(method) = method {
                config.method = method;
            }
            config.rerun_report |= rerun;

            screen(&data_dir, &labels, config, &format)?;
        }
        Commands::Correlate {
            data_dir,
            labels,
            max_lag,
            format,
        } => {
            correlate(&data_dir, &labels, max_lag, &format)?;
        }
    }

    Ok(())
}

fn load(
    data_dir: &Path,
    index_column: &str,
    labels: &[String],
) -> Result<PanelStore, Box<dyn std::error::Error>> {
    let loader = CsvPanelLoader::new(CsvLoaderConfig {
        index_column: index_column.to_string(),
        ..CsvLoaderConfig::with_root(data_dir)
    });
    let store = loader.load(labels)?;
    info!(labels = store.len(), root = %data_dir.display(), "panel loaded");
    Ok(store)
}

fn screen(
    data_dir: &Path,
    labels: &[String],
    config: ScreenConfig,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load(data_dir, &config.index_column, labels)?;
    let is_json = format.to_lowercase() == "json";

    let screen = Screen::new(config);
    let outcome = if is_json {
        screen.run(&mut store, labels, &mut ratescreen::NullRenderer)?
    } else {
        screen.run(&mut store, labels, &mut StdoutRenderer)?
    };

    if is_json {
        println!("{}", serde_json::to_string_pretty(&outcome_json(&outcome)?)?);
    } else if outcome.differenced.is_empty() {
        println!("No series differenced");
    } else {
        let keys: Vec<String> = outcome.differenced.iter().map(ToString::to_string).collect();
        println!("Differenced: {}", keys.join(", "));
    }

    Ok(())
}

fn correlate(
    data_dir: &Path,
    labels: &[String],
    max_lag: usize,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load(data_dir, ratescreen_data::DEFAULT_INDEX_COLUMN, labels)?;
    append_growth(&mut store, labels, YOY_GROWTH)?;
    let correlations = correlate_with_lags(&store, labels, max_lag)?;

    if format.to_lowercase() == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&correlations_json(&correlations))?
        );
    } else {
        println!("Lag correlations\n{}", correlations.table);
    }

    Ok(())
}
