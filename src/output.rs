//! Output artifacts: hex boundaries as GeoJSON and a table of hex ids.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use h3o::CellIndex;

use crate::grid::HexGrid;

pub const HEX_ID_FIELD: &str = "h3_hex_id";

/// One polygon feature per cell, tagged with the cell id.
///
/// The grid returns `[lat, lng]` vertices while GeoJSON expects `[lng, lat]`,
/// so every vertex is swapped. The ring keeps the grid's closure convention.
pub fn to_feature_collection<G: HexGrid>(grid: &G, cells: &[CellIndex]) -> FeatureCollection {
    let features = cells
        .iter()
        .map(|&cell| {
            let ring = grid
                .boundary(cell)
                .into_iter()
                .map(|vertex| vec![vertex.lng(), vertex.lat()])
                .collect();

            let mut properties = JsonObject::new();
            properties.insert(HEX_ID_FIELD.to_owned(), JsonValue::from(u64::from(cell)));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

pub fn write_geojson<W: Write>(mut writer: W, collection: &FeatureCollection) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, collection)?;
    writer.flush()?;
    Ok(())
}

/// Writes a `h3_hex_id` header followed by one lowercase hexadecimal id per row.
pub fn write_table<W: Write>(writer: W, cells: &[CellIndex]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([HEX_ID_FIELD])?;
    for cell in cells {
        csv.write_record([format!("{:x}", u64::from(*cell))])?;
    }
    csv.flush()?;
    Ok(())
}

/// Creates (or truncates) an output file.
pub fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    Ok(BufWriter::new(file))
}
