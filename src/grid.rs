use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use geo_types::{Coord, LineString, Polygon};
use geojson::PolygonType;
use h3o::{
    geom::{ContainmentMode, TilerBuilder},
    CellIndex, LatLng, Resolution,
};
use serde::Deserialize;

/// The discrete global grid the pipeline fills polygons with.
pub trait HexGrid {
    /// Cells covering a polygon given as GeoJSON rings (`[lng, lat]` positions,
    /// outer ring first, holes after).
    fn polyfill(&self, rings: &PolygonType, resolution: Resolution) -> Result<Vec<CellIndex>>;

    /// Outline of a cell, in the vertex order and closure the grid returns.
    fn boundary(&self, cell: CellIndex) -> Vec<LatLng>;
}

/// Rule deciding whether a cell belongs to a polygon.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Containment {
    /// Cell centroid lies inside the polygon
    #[default]
    ContainsCentroid,
    /// Cell lies entirely inside the polygon
    ContainsBoundary,
    /// Cell touches the polygon
    IntersectsBoundary,
    /// Like `IntersectsBoundary`, but a polygon smaller than a cell still yields that cell
    Covers,
}

impl From<Containment> for ContainmentMode {
    fn from(value: Containment) -> Self {
        match value {
            Containment::ContainsCentroid => ContainmentMode::ContainsCentroid,
            Containment::ContainsBoundary => ContainmentMode::ContainsBoundary,
            Containment::IntersectsBoundary => ContainmentMode::IntersectsBoundary,
            Containment::Covers => ContainmentMode::Covers,
        }
    }
}

/// [`HexGrid`] backed by `h3o`.
#[derive(Debug, Default, Clone, Copy)]
pub struct H3Grid {
    containment: Containment,
}

impl H3Grid {
    pub fn new(containment: Containment) -> Self {
        Self { containment }
    }
}

impl HexGrid for H3Grid {
    fn polyfill(&self, rings: &PolygonType, resolution: Resolution) -> Result<Vec<CellIndex>> {
        let polygon = to_polygon(rings)?;
        let mut tiler = TilerBuilder::new(resolution)
            .containment_mode(self.containment.into())
            .build();
        tiler.add(polygon).context("Polygon rejected by H3")?;
        Ok(tiler.into_coverage().collect())
    }

    fn boundary(&self, cell: CellIndex) -> Vec<LatLng> {
        cell.boundary().iter().copied().collect()
    }
}

fn to_polygon(rings: &PolygonType) -> Result<Polygon<f64>> {
    let mut rings = rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|position| match position.as_slice() {
                    [x, y, ..] => Ok(Coord { x: *x, y: *y }),
                    _ => bail!("Invalid position {position:?}"),
                })
                .collect::<Result<Vec<_>>>()
                .map(LineString::new)
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter();

    let Some(exterior) = rings.next() else {
        bail!("Polygon has no rings");
    };
    Ok(Polygon::new(exterior, rings.collect()))
}
