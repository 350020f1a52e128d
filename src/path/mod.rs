//! An explicit polyline type, measured in the units of the reference
//! system its vertices are expressed in.
//!
//! Lengths and cuts are planar (Euclidean), so they are only meaningful in
//! meters once the path has been [reprojected](Path::reproject) into a metric
//! system such as a UTM zone.

use std::io::Read;

use geo::{Coord, Distance, Euclidean, LineString, Point};
use itertools::Itertools;
use roadside_geo::{Reproject, Srid, Transformer};
use wkt::{ToWkt, TryFromWkt};

use crate::error::Error;

#[doc(hidden)]
pub mod cut;
#[doc(hidden)]
pub mod error;

#[doc(inline)]
pub use cut::{Cut, VERTEX_EPSILON, cut_geographic};
#[doc(inline)]
pub use error::PathError;

/// The planar length of the segment between two vertices.
#[inline]
pub(crate) fn segment_length(start: Coord, end: Coord) -> f64 {
    Euclidean.distance(Point(start), Point(end))
}

/// An ordered sequence of at least two vertices, all within the same
/// reference system, describing a polyline.
///
/// ### Invariants
/// Every vertex is finite, and no two consecutive vertices coincide.
/// The path is assumed to be simple (non self-intersecting) but this is
/// not checked.
///
/// ```rust
/// use roadside::Path;
/// use roadside_geo::Srid;
/// use geo::coord;
///
/// let path = Path::new(Srid(32611), vec![
///     coord! { x: 0.0, y: 0.0 },
///     coord! { x: 3.0, y: 4.0 },
/// ]).unwrap();
///
/// assert_eq!(path.length(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    srid: Srid,
    coords: Vec<Coord>,
}

impl Path {
    pub fn new(srid: Srid, coords: Vec<Coord>) -> Result<Self, PathError> {
        if coords.len() < 2 {
            return Err(PathError::Degenerate(format!(
                "A path requires at least 2 vertices. Given: {}",
                coords.len()
            )));
        }

        if let Some(index) = coords
            .iter()
            .position(|coord| !(coord.x.is_finite() && coord.y.is_finite()))
        {
            return Err(PathError::Degenerate(format!(
                "Vertex {index} is not finite. Given: {:?}",
                coords[index]
            )));
        }

        if let Some(index) = coords.windows(2).position(|pair| pair[0] == pair[1]) {
            return Err(PathError::Degenerate(format!(
                "Vertices {} and {} coincide at {:?}",
                index,
                index + 1,
                coords[index]
            )));
        }

        Ok(Path { srid, coords })
    }

    /// Constructs a path from vertices already known to uphold the invariants.
    pub(crate) fn from_unchecked(srid: Srid, coords: Vec<Coord>) -> Self {
        debug_assert!(coords.len() >= 2);
        Path { srid, coords }
    }

    /// Reads a WKT `LINESTRING`, whose vertices are expressed in `srid`.
    pub fn from_wkt(srid: Srid, wkt: &str) -> Result<Self, PathError> {
        let linestring = LineString::<f64>::try_from_wkt_str(wkt)
            .map_err(|err| PathError::Wkt(err.to_string()))?;

        Path::new(srid, linestring.0)
    }

    /// Reads a WKT `LINESTRING` from a file, stdin or any other reader.
    pub fn read_wkt(srid: Srid, mut reader: impl Read) -> Result<Self, Error> {
        let mut wkt = String::new();
        reader.read_to_string(&mut wkt)?;

        Ok(Path::from_wkt(srid, wkt.trim())?)
    }

    pub fn to_wkt(&self) -> String {
        self.linestring().wkt_string()
    }

    pub fn srid(&self) -> Srid {
        self.srid
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// The number of vertices in the path, at least 2.
    pub fn vertex_count(&self) -> usize {
        self.coords.len()
    }

    pub fn first(&self) -> Coord {
        self.coords[0]
    }

    pub fn last(&self) -> Coord {
        self.coords[self.coords.len() - 1]
    }

    pub fn linestring(&self) -> LineString {
        LineString::new(self.coords.clone())
    }

    /// The cumulative straight-line distance along every segment of the path.
    pub fn length(&self) -> f64 {
        self.coords
            .iter()
            .tuple_windows()
            .map(|(start, end)| segment_length(*start, *end))
            .sum()
    }

    /// The point found `distance` units along the path from its first vertex.
    ///
    /// Distances before the start or beyond the end are clamped onto the
    /// first and last vertex respectively. Non-finite distances have no point.
    pub fn point_at(&self, distance: f64) -> Option<Coord> {
        if !distance.is_finite() {
            return None;
        }

        let mut travelled = 0.0;
        for (&start, &end) in self.coords.iter().tuple_windows() {
            let segment = segment_length(start, end);

            if travelled + segment >= distance {
                let ratio = ((distance - travelled) / segment).clamp(0.0, 1.0);
                return Some(start + (end - start) * ratio);
            }

            travelled += segment;
        }

        Some(self.last())
    }

    /// Moves every vertex of the path into another reference system.
    pub fn reproject(&self, to: Srid) -> Result<Path, PathError> {
        self.transform(&Transformer::new(self.srid, to)?)
    }

    /// Moves every vertex of the path using an already resolved transformer,
    /// whose source must be the reference system of this path.
    pub fn transform(&self, transformer: &Transformer) -> Result<Path, PathError> {
        if transformer.source() != self.srid {
            return Err(PathError::Geo(roadside_geo::GeoError::InvalidReferenceSystem(
                transformer.source(),
            )));
        }

        let coords = self.coords.transform(transformer)?;
        Path::new(transformer.target(), coords)
    }
}

impl From<Path> for LineString {
    fn from(path: Path) -> Self {
        LineString::new(path.coords)
    }
}
