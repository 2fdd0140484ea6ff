use anyhow::Result;
use h3o::{CellIndex, Resolution};
use itertools::Itertools;
use log::{debug, info};

use crate::{
    config::Config,
    grid::{H3Grid, HexGrid},
    model::{self, Region},
    output,
};

/// Fills every region with cells and returns the union without duplicates,
/// in order of first occurrence.
pub fn extract<G: HexGrid>(
    grid: &G,
    regions: &[Region],
    resolution: Resolution,
) -> Result<Vec<CellIndex>> {
    let mut cells = Vec::new();
    for (i, region) in regions.iter().enumerate() {
        debug!("Processing feature: {}/{}", i + 1, regions.len());
        for polygon in region.polygons() {
            cells.extend(grid.polyfill(polygon, resolution)?);
        }
    }

    let total = cells.len();
    let cells: Vec<CellIndex> = cells.into_iter().unique().collect();
    info!("{} cells found, {} unique", total, cells.len());
    Ok(cells)
}

/// Reads the input, extracts hexes and writes both output files.
///
/// Nothing is written unless the input loads and extraction succeeds, so a
/// failed run leaves earlier outputs untouched.
pub fn run(config: &Config) -> Result<()> {
    let resolution = config.resolution()?;
    let grid = H3Grid::new(config.containment);

    info!("Reading geojson file: {}", config.input_path.display());
    let regions = model::load(&config.input_path)?;

    info!("Loading H3 hexes at resolution {}", u8::from(resolution));
    let cells = extract(&grid, &regions, resolution)?;

    info!("Creating new geojson with H3 hexes");
    let collection = output::to_feature_collection(&grid, &cells);

    let path = &config.output_geojson_path;
    info!("Writing geojson with H3 hexes to file: {}", path.display());
    output::write_geojson(output::create(path)?, &collection)?;

    let path = &config.output_csv_path;
    info!("Writing CSV with H3 hexes to file: {}", path.display());
    output::write_table(output::create(path)?, &cells)?;

    info!("Done!");
    Ok(())
}
