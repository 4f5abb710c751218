//! Scrollzone CLI
//!
//! Replay drag scripts against a headless host and inspect configurations.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use scrollzone::ScrollzoneConfig;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod script;
mod simulate;

use script::Script;

#[derive(Parser)]
#[command(name = "scrollzone")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Edge-triggered drag autoscroll simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a drag script and print every scroll step
    Simulate {
        /// Script file (TOML)
        script: PathBuf,

        /// Controller configuration file (overrides the script's [config])
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print a configuration as TOML
    Config {
        /// Preset to print
        #[arg(short, long, value_enum, default_value = "default")]
        preset: Preset,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Default,
    Html5,
    Touch,
}

impl Preset {
    fn config(self) -> ScrollzoneConfig {
        match self {
            Preset::Default => ScrollzoneConfig::default(),
            Preset::Html5 => ScrollzoneConfig::html5(),
            Preset::Touch => ScrollzoneConfig::touch(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate { script, config } => cmd_simulate(&script, config.as_deref()),
        Commands::Config { preset } => cmd_config(preset),
    }
}

fn cmd_simulate(script_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let script = Script::load(script_path)?;

    let config = match config_path {
        Some(path) => ScrollzoneConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => script.config.clone().unwrap_or_default(),
    };

    info!(
        "Simulating {} ({} steps, buffer {}, speed {})",
        script_path.display(),
        script.steps.len(),
        config.buffer,
        config.strength_multiplier
    );

    let report = simulate::run(&script, config)?;

    for record in &report.records {
        println!(
            "frame {:>4}  t={:>7.1}ms  left={:>7.1}  top={:>7.1}",
            record.frame,
            record.time.as_secs_f64() * 1000.0,
            record.left,
            record.top
        );
    }

    info!(
        "{} scroll steps over {} frames, final offset ({}, {})",
        report.records.len(),
        report.frames_run,
        report.final_left,
        report.final_top
    );

    Ok(())
}

fn cmd_config(preset: Preset) -> Result<()> {
    print!("{}", preset.config().to_toml_string()?);
    Ok(())
}
