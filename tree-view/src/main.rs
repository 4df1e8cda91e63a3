//! Entry point for the DNA tree viewer.
//!
//! By default this opens an eframe/egui window and hands everything to
//! [`Viewer`]. With `--headless <TICKS>` it grows the tree in a plain loop
//! and only logs what it would have drawn.

mod headless;
mod painter;
mod viewer;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tree_core::{Config, Palette};
use viewer::Viewer;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML or JSON). If not specified, searches for
    /// tree.yaml, tree.yml, or tree.json in the current directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random source; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Preset palette name; overrides the config file.
    #[arg(long)]
    palette: Option<String>,

    /// Run this many ticks without a window.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Print the preset palette names and exit.
    #[arg(long)]
    list_palettes: bool,
}

/// Loads the config file (or defaults) and applies command-line overrides.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::from_default_paths(),
    };

    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if args.palette.is_some() {
        cfg.palette = args.palette.clone();
    }
    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.list_palettes {
        for name in Palette::preset_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let cfg = load_config(&args)?;
    info!(?cfg, "starting");

    if let Some(ticks) = args.headless {
        return headless::run(cfg, ticks);
    }

    let viewer = Viewer::new(cfg).context("failed to plant tree")?;
    eframe::run_native(
        "DNA Tree",
        eframe::NativeOptions::default(),
        Box::new(|_cc| Ok(Box::new(viewer))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
