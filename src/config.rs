use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use h3o::Resolution;
use serde::Deserialize;

use crate::grid::Containment;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_PATH: &str = "hexfill.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub resolution: u8,
    pub input_path: PathBuf,
    pub output_geojson_path: PathBuf,
    pub output_csv_path: PathBuf,

    // how polyfill decides whether a cell belongs to a polygon
    pub containment: Containment,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: 12,
            input_path: PathBuf::from("geojson.json"),
            output_geojson_path: PathBuf::from("geojson_h3_hexes.json"),
            output_csv_path: PathBuf::from("table_h3_hexes.csv"),
            containment: Containment::default(),
        }
    }
}

impl Config {
    pub fn resolution(&self) -> Result<Resolution> {
        Resolution::try_from(self.resolution)
            .with_context(|| format!("Invalid H3 resolution {}", self.resolution))
    }
}

pub fn load(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path).context("Failed to read config")?;
    parse(&data)
}

fn parse(data: &str) -> Result<Config> {
    let config = toml::from_str(data).context("Failed to parse config")?;
    Ok(config)
}

/// Loads the explicit config if one was given, otherwise `hexfill.toml` when
/// present, otherwise the built-in defaults.
pub fn resolve(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load(path),
        None => {
            let path = Path::new(DEFAULT_PATH);
            if path.exists() {
                load(path)
            } else {
                Ok(Config::default())
            }
        }
    }
}
