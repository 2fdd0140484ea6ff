use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{config::Config, grid::Containment};

mod config;
mod extract;
mod grid;
mod model;
mod output;

/// Fill GeoJSON polygons with H3 hexes and write them out as GeoJSON and CSV.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// TOML config file, defaults to ./hexfill.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=15))]
    resolution: Option<u8>,

    /// GeoJSON FeatureCollection to read
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[arg(long)]
    output_geojson: Option<PathBuf>,

    #[arg(long)]
    output_csv: Option<PathBuf>,

    #[arg(long, value_enum)]
    containment: Option<Containment>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(path) = self.input {
            config.input_path = path;
        }
        if let Some(path) = self.output_geojson {
            config.output_geojson_path = path;
        }
        if let Some(path) = self.output_csv {
            config.output_csv_path = path;
        }
        if let Some(containment) = self.containment {
            config.containment = containment;
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = config::resolve(cli.config.as_deref())?;
    cli.apply(&mut config);

    extract::run(&config)
}
