//! Input geometries accepted by the extraction pipeline.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use geojson::{FeatureCollection, GeoJson, Geometry, PolygonType, Value};

/// A polygonal area to fill with hexes. Any other geometry type is rejected
/// when the input is loaded, before any cell is computed.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Polygon(PolygonType),
    MultiPolygon(Vec<PolygonType>),
}

impl Region {
    /// Every polygon in the region, each one to be filled independently.
    pub fn polygons(&self) -> &[PolygonType] {
        match self {
            Region::Polygon(rings) => std::slice::from_ref(rings),
            Region::MultiPolygon(polygons) => polygons,
        }
    }
}

impl TryFrom<Geometry> for Region {
    type Error = anyhow::Error;

    fn try_from(geometry: Geometry) -> Result<Self> {
        match geometry.value {
            Value::Polygon(rings) => Ok(Region::Polygon(rings)),
            Value::MultiPolygon(polygons) => Ok(Region::MultiPolygon(polygons)),
            other => bail!("Geometry type not supported: {}", type_name(&other)),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Reads a GeoJSON FeatureCollection and converts every feature into a [`Region`].
pub fn load(path: &Path) -> Result<Vec<Region>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read geojson file {}", path.display()))?;
    parse(&data).with_context(|| format!("Failed to load geojson file {}", path.display()))
}

pub fn parse(data: &str) -> Result<Vec<Region>> {
    let geojson: GeoJson = data.parse()?;
    let collection = FeatureCollection::try_from(geojson)?;

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(i, feature)| {
            let geometry = feature
                .geometry
                .with_context(|| format!("Feature {} has no geometry", i + 1))?;
            Region::try_from(geometry).with_context(|| format!("Feature {} rejected", i + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_and_multipolygon() {
        let regions = parse(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": {"name": "square"},
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[[0, 0], [0, 1], [1, 1], [1, 0], [0, 0]]]
                        }
                    },
                    {
                        "type": "Feature",
                        "properties": null,
                        "geometry": {
                            "type": "MultiPolygon",
                            "coordinates": [
                                [[[2, 2], [2, 3], [3, 3], [2, 2]]],
                                [[[4, 4], [4, 5], [5, 5], [4, 4]]]
                            ]
                        }
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(regions.len(), 2);
        assert!(matches!(regions[0], Region::Polygon(_)));
        assert_eq!(regions[0].polygons().len(), 1);
        assert_eq!(regions[1].polygons().len(), 2);
        assert_eq!(regions[1].polygons()[1][0][1], vec![4.0, 5.0]);
    }

    #[test]
    fn line_string_is_rejected() {
        let err = parse(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {},
                    "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}
                }]
            }"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Geometry type not supported: LineString"));
    }

    #[test]
    fn missing_geometry_names_feature() {
        let err = parse(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": {},
                        "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [0, 1], [1, 1], [0, 0]]]}
                    },
                    {"type": "Feature", "properties": {}, "geometry": null}
                ]
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Feature 2 has no geometry"));
    }

    #[test]
    fn malformed_json() {
        assert!(parse(r#"{"type": "FeatureCollection", "features": ["#).is_err());
    }

    #[test]
    fn bare_geometry_is_not_a_collection() {
        assert!(parse(r#"{"type": "Point", "coordinates": [0, 0]}"#).is_err());
    }
}
