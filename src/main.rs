#![allow(unexpected_cfgs)] // Silence cfg warnings inside objc macros

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dwellpad::events::init_event_bus;
use dwellpad::model::AppState;
use dwellpad::storage::{load_config, load_presets, AppPaths};

#[cfg(target_os = "macos")]
mod macos_main;

#[derive(Parser)]
#[command(name = "dwellpad")]
#[command(version)]
#[command(about = "Floating dwell/hover key panels", long_about = None)]
struct Cli {
    /// Directory containing preset JSON files
    #[arg(long, value_name = "DIR")]
    presets: Option<PathBuf>,

    /// Path of the global config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let paths = AppPaths::resolve(cli.presets, cli.config);
    info!(
        "Presets: {:?}, config: {:?}",
        paths.presets_dir, paths.config_file
    );

    let presets = load_presets(&paths.presets_dir);
    let config = load_config(&paths.config_file);
    info!("Loaded {} preset(s)", presets.len());
    let state = AppState::new(presets, config);

    init_event_bus();

    #[cfg(target_os = "macos")]
    {
        macos_main::run(state, paths);
        Ok(())
    }

    #[cfg(not(target_os = "macos"))]
    {
        drop((state, paths));
        tracing::error!("dwellpad only runs on macOS");
        std::process::exit(1);
    }
}
