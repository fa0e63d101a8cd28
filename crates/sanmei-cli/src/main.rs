// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use sanmei_core::angle::format_deg;
use sanmei_core::catalog::{Poi, PoiCatalog};
use sanmei_core::config::ViewConfig;
use sanmei_core::export::write_csv;
use sanmei_core::view::MapView;
use sanmei_core::{resolve, Resolution, SearchIntent};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// GeoJSON FeatureCollection of mountain POIs
    #[arg(short, long, env = "SANMEI_DATA", global = true)]
    data: Option<PathBuf>,

    /// View config file (defaults to the per-user config directory)
    #[arg(long, env = "SANMEI_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log parser and query decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Treat input like the search box: coordinates recenter, anything else searches
    Resolve { input: String },
    /// Format decimal degrees as D°MM′SS″
    Dms { degrees: f64 },
    /// Search POIs, optionally exporting the results as CSV
    Search {
        query: String,
        /// Write results to this CSV file ("-" for stdout)
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Prefix the CSV with a UTF-8 byte order mark
        #[arg(long, requires = "csv")]
        bom: bool,
    },
    /// Show the detail rows for one POI
    Detail { id: u64 },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => ViewConfig::load_from(path),
        None => ViewConfig::load(),
    }
    .context("Failed to load view config")?;

    match &cli.command {
        Commands::Resolve { input } => {
            let resolution = resolve(input);
            let mut view = MapView::new(&config);
            if view.apply(&resolution) {
                println!(
                    "Recenter: lon {} lat {} ({} {})",
                    view.center.lon,
                    view.center.lat,
                    format_deg(view.center.lat),
                    format_deg(view.center.lon)
                );
            } else if let Resolution::Search(intent) = &resolution {
                println!("Search: {:?}", intent);
                if let Some(path) = &cli.data {
                    let catalog = load_catalog(path)?;
                    print_results(&catalog.search(intent, config.recent_limit));
                }
            }
        }
        Commands::Dms { degrees } => {
            println!("{}", format_deg(*degrees));
        }
        Commands::Search { query, csv, bom } => {
            let catalog = load_catalog(require_data(&cli.data)?)?;
            let intent = SearchIntent::classify(query);
            let results = catalog.search(&intent, config.recent_limit);

            match csv {
                Some(path) if path.as_os_str() == "-" => {
                    write_csv(io::stdout().lock(), results.iter().copied(), *bom)?;
                }
                Some(path) => {
                    let file = File::create(path)
                        .with_context(|| format!("Failed to create CSV file: {:?}", path))?;
                    write_csv(file, results.iter().copied(), *bom)?;
                    println!("Wrote {} rows to {:?}", results.len(), path);
                }
                None => print_results(&results),
            }
        }
        Commands::Detail { id } => {
            let catalog = load_catalog(require_data(&cli.data)?)?;
            let poi = catalog.require(*id)?;
            println!("{}", poi.name);
            for (label, value) in poi.detail_rows() {
                println!("  {}\t{}", label, value.replace('\n', " / "));
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    // Ignore "already initialized".
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn require_data(data: &Option<PathBuf>) -> Result<&Path> {
    data.as_deref()
        .ok_or_else(|| anyhow::anyhow!("No POI data given. Pass --data or set SANMEI_DATA."))
}

fn load_catalog(path: &Path) -> Result<PoiCatalog> {
    PoiCatalog::load_geojson(path)
        .with_context(|| format!("Failed to load POI data from {:?}", path))
}

fn print_results(results: &[&Poi]) {
    println!("{}件", results.len());
    for p in results {
        println!("{}\t{}\t{}\t{} m", p.id, p.name, p.kana, p.alt);
    }
}
