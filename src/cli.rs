//! Command-line driver over the planner.

use crate::{
    format_length, parse_length, Config, FileStore, FurnitureCatalog, LengthUnit, PlannerState,
};
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(
    name = "roomkit",
    about = "Inspect, resize and export stored furniture layouts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List catalog models, optionally filtered by name.
    Models {
        /// Path to the `models.json` catalog.
        catalog: PathBuf,
        /// Case-insensitive name filter.
        filter: Option<String>,
    },

    /// Summarize a stored layout.
    Show(LayoutArgs),

    /// Write the render form of a stored layout and print it.
    Export(LayoutArgs),

    /// Change the room dimensions of a stored layout.
    Resize(ResizeArgs),
}

#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Path to the `models.json` catalog.
    pub catalog: PathBuf,

    /// Storage key; defaults to the configured layout key.
    pub key: Option<String>,
}

#[derive(Debug, Args)]
pub struct ResizeArgs {
    /// Path to the `models.json` catalog.
    pub catalog: PathBuf,

    /// New room width, e.g. `4.2` or `13 1/2`.
    pub width: String,

    /// New room height.
    pub height: String,

    /// Unit of the dimensions; defaults to the configured unit.
    #[arg(long)]
    pub unit: Option<LengthUnit>,

    /// Storage key; defaults to the configured layout key.
    #[arg(long)]
    pub key: Option<String>,
}

pub fn run_from_env() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default().context("Failed to load configuration")?;
    run(cli, &config)
}

pub fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Models { catalog, filter } => {
            let catalog = load_catalog(&catalog)?;
            let names = match filter.as_deref() {
                Some(filter) => catalog.search(filter),
                None => catalog.names().collect(),
            };
            for name in names {
                if let Some(entry) = catalog.get(name) {
                    println!("{name}\t{}x{}", entry.width(), entry.height());
                }
            }
            Ok(())
        }
        Commands::Show(args) => {
            let (planner, _) = open_layout(config, &args.catalog, args.key, true)?;
            print_summary(&planner, config.room.unit);
            Ok(())
        }
        Commands::Export(args) => {
            let (planner, mut store) = open_layout(config, &args.catalog, args.key, true)?;
            planner.export_to_store(&mut store, &config.storage.export_key)?;
            println!("{}", planner.export_layout().to_json()?);
            Ok(())
        }
        Commands::Resize(args) => run_resize(args, config),
    }
}

fn run_resize(args: ResizeArgs, config: &Config) -> anyhow::Result<()> {
    let unit = args.unit.unwrap_or(config.room.unit);
    let width = parse_length(&args.width, unit)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Invalid room width '{}'", args.width))?;
    let height = parse_length(&args.height, unit)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Invalid room height '{}'", args.height))?;

    let key = args
        .key
        .unwrap_or_else(|| config.storage.layout_key.clone());
    let (mut planner, mut store) = open_layout(config, &args.catalog, Some(key.clone()), false)?;
    planner.resize_room(width, height)?;

    let misplaced = planner.misplaced_items();
    if !misplaced.is_empty() {
        tracing::warn!(
            "{} item(s) no longer fit the room: {:?}",
            misplaced.len(),
            misplaced
        );
    }

    planner.save_to_store(&mut store, &key)?;
    print_summary(&planner, unit);
    Ok(())
}

fn load_catalog(path: &Path) -> anyhow::Result<FurnitureCatalog> {
    let catalog = FurnitureCatalog::load_from_file(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;
    tracing::info!(
        "RoomKit {} (built {}), {} catalog models",
        crate::VERSION,
        crate::BUILD_DATE,
        catalog.len()
    );
    Ok(catalog)
}

/// Opens the layout stored under `key`. A missing layout is an error when
/// `required`, otherwise the planner starts from the configured defaults.
fn open_layout(
    config: &Config,
    catalog: &Path,
    key: Option<String>,
    required: bool,
) -> anyhow::Result<(PlannerState, FileStore)> {
    let catalog = load_catalog(catalog)?;
    let key = key.unwrap_or_else(|| config.storage.layout_key.clone());
    let store = FileStore::new(config.storage.directory.clone());
    let mut planner = PlannerState::from_config(config, Arc::new(catalog))?;

    if !planner.load_from_store(&store, &key)? && required {
        bail!(
            "No layout stored under '{}' in {}",
            key,
            store.directory().display()
        );
    }
    Ok((planner, store))
}

fn print_summary(planner: &PlannerState, unit: LengthUnit) {
    let room = planner.room();
    println!(
        "{}: {} x {}, {} items",
        planner.display_name(),
        format_length(room.width(), unit),
        format_length(room.height(), unit),
        planner.item_count()
    );
    for item in planner.items() {
        println!(
            "  #{} {} at ({}, {}) rotated {}°{}",
            item.id,
            item.model_name,
            item.position.x,
            item.position.y,
            item.relative_rotation(),
            if item.flipped { ", flipped" } else { "" }
        );
    }
}
