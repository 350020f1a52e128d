//! Required structures to project between reference systems

use geo::{Coord, LineString, Point};
use log::trace;

#[cfg(feature = "tracing")]
use tracing::Level;

use crate::coord::point::is_finite;
use crate::crs::{Crs, Srid};
use crate::error::GeoError;
use crate::{WEB_MERCATOR_EXTENT, WEB_MERCATOR_MAX_LAT, WGS84_SEMI_MAJOR};

mod utm;

/// Allows for projection between the geographic system and another standard.
pub trait Projection {
    /// The identifier of the system projected into.
    fn srid(&self) -> Srid;

    /// Projects a longitude/latitude coordinate (degrees) into this system.
    fn forward(&self, geographic: Coord) -> Result<Coord, GeoError>;

    /// Projects a coordinate of this system back to longitude/latitude (degrees).
    fn inverse(&self, projected: Coord) -> Result<Coord, GeoError>;
}

#[doc(hidden)]
pub mod projections {
    /// Plain longitude/latitude, which projects onto itself.
    pub struct Geographic;

    /// In the definition given here, the sphere uses the WGS84 semi-major axis.
    /// *Learn more [here](https://en.wikipedia.org/wiki/Web_Mercator_projection?useskin=vector).*
    pub struct WebMercator;

    /// A transverse mercator, parameterised as one of the 120 UTM zones on WGS84.
    ///
    /// ```rust
    /// use roadside_geo::{Hemisphere, Projection};
    /// use roadside_geo::project::TransverseMercator;
    /// use geo::coord;
    ///
    /// // The origin of zone 31 sits on the equator at 3°E.
    /// let zone = TransverseMercator::new(31, Hemisphere::North);
    /// let origin = zone.forward(coord! { x: 3.0, y: 0.0 }).unwrap();
    /// assert!((origin.x - 500_000.0).abs() < 1e-6);
    /// ```
    /// *Learn more [at wikipedia](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system).*
    pub struct TransverseMercator {
        pub(crate) zone: u8,
        pub(crate) hemisphere: crate::Hemisphere,
        pub(crate) series: super::utm::Series,
    }
}

#[doc(inline)]
pub use projections::Geographic;
#[doc(inline)]
pub use projections::TransverseMercator;
#[doc(inline)]
pub use projections::WebMercator;

fn outside(srid: Srid, coord: Coord) -> GeoError {
    GeoError::ProjectionDomain {
        srid,
        x: coord.x,
        y: coord.y,
    }
}

impl Geographic {
    fn check(coord: Coord) -> Result<Coord, GeoError> {
        let valid = is_finite(&coord)
            && (-180.0..=180.0).contains(&coord.x)
            && (-90.0..=90.0).contains(&coord.y);

        match valid {
            true => Ok(coord),
            false => Err(outside(Srid::WGS84, coord)),
        }
    }
}

impl Projection for Geographic {
    fn srid(&self) -> Srid {
        Srid::WGS84
    }

    fn forward(&self, geographic: Coord) -> Result<Coord, GeoError> {
        Geographic::check(geographic)
    }

    fn inverse(&self, projected: Coord) -> Result<Coord, GeoError> {
        Geographic::check(projected)
    }
}

impl Projection for WebMercator {
    fn srid(&self) -> Srid {
        Srid::WEB_MERCATOR
    }

    fn forward(&self, geographic: Coord) -> Result<Coord, GeoError> {
        let Coord { x: lng, y: lat } = Geographic::check(geographic)?;
        if lat.abs() > WEB_MERCATOR_MAX_LAT {
            return Err(outside(Srid::WGS84, geographic));
        }

        let x = WGS84_SEMI_MAJOR * lng.to_radians();
        let y = WGS84_SEMI_MAJOR
            * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0)
                .tan()
                .ln();

        Ok(Coord { x, y })
    }

    fn inverse(&self, projected: Coord) -> Result<Coord, GeoError> {
        // Allow for the rounding of coordinates sat exactly on the edge of the square.
        const TOLERANCE: f64 = 1e-6;

        let limit = WEB_MERCATOR_EXTENT + TOLERANCE;
        if !is_finite(&projected) || projected.x.abs() > limit || projected.y.abs() > limit {
            return Err(outside(Srid::WEB_MERCATOR, projected));
        }

        let lng = (projected.x / WGS84_SEMI_MAJOR).to_degrees().clamp(-180.0, 180.0);
        let lat = (2.0 * (projected.y / WGS84_SEMI_MAJOR).exp().atan()
            - std::f64::consts::FRAC_PI_2)
            .to_degrees();

        Ok(Coord { x: lng, y: lat })
    }
}

impl Projection for Crs {
    fn srid(&self) -> Srid {
        Crs::srid(self)
    }

    fn forward(&self, geographic: Coord) -> Result<Coord, GeoError> {
        match self {
            Crs::Geographic => Geographic.forward(geographic),
            Crs::WebMercator => WebMercator.forward(geographic),
            Crs::Utm { zone, hemisphere } => {
                TransverseMercator::new(*zone, *hemisphere).forward(geographic)
            }
        }
    }

    fn inverse(&self, projected: Coord) -> Result<Coord, GeoError> {
        match self {
            Crs::Geographic => Geographic.inverse(projected),
            Crs::WebMercator => WebMercator.inverse(projected),
            Crs::Utm { zone, hemisphere } => {
                TransverseMercator::new(*zone, *hemisphere).inverse(projected)
            }
        }
    }
}

/// Converts coordinates from one reference system into another,
/// passing through longitude/latitude on the way.
///
/// Both identifiers are resolved once, on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformer {
    from: Crs,
    to: Crs,
}

impl Transformer {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG))]
    pub fn new(from: Srid, to: Srid) -> Result<Self, GeoError> {
        Ok(Transformer {
            from: Crs::resolve(from)?,
            to: Crs::resolve(to)?,
        })
    }

    pub fn source(&self) -> Srid {
        self.from.srid()
    }

    pub fn target(&self) -> Srid {
        self.to.srid()
    }

    /// The transformer running in the opposite direction.
    pub fn inverted(&self) -> Transformer {
        Transformer {
            from: self.to,
            to: self.from,
        }
    }

    pub fn transform(&self, coord: Coord) -> Result<Coord, GeoError> {
        if self.from == self.to {
            // Identity, still bounded by the domain of the system.
            self.from.inverse(coord)?;
            return Ok(coord);
        }

        let geographic = self.from.inverse(coord)?;
        let projected = self.to.forward(geographic)?;

        trace!(
            "{} -> {}: ({}, {}) => ({}, {})",
            self.source(),
            self.target(),
            coord.x,
            coord.y,
            projected.x,
            projected.y
        );

        Ok(projected)
    }
}

/// A geometry whose every vertex can be moved between reference systems.
/// Vertex order and count are preserved.
pub trait Reproject: Sized {
    fn transform(&self, transformer: &Transformer) -> Result<Self, GeoError>;

    /// Resolves both systems and transforms the geometry between them.
    fn reproject(&self, from: Srid, to: Srid) -> Result<Self, GeoError> {
        self.transform(&Transformer::new(from, to)?)
    }
}

impl Reproject for Coord {
    fn transform(&self, transformer: &Transformer) -> Result<Self, GeoError> {
        transformer.transform(*self)
    }
}

impl Reproject for Point {
    fn transform(&self, transformer: &Transformer) -> Result<Self, GeoError> {
        transformer.transform(self.0).map(Point)
    }
}

impl Reproject for Vec<Coord> {
    fn transform(&self, transformer: &Transformer) -> Result<Self, GeoError> {
        self.iter()
            .map(|coord| transformer.transform(*coord))
            .collect()
    }
}

impl Reproject for LineString {
    fn transform(&self, transformer: &Transformer) -> Result<Self, GeoError> {
        self.0.transform(transformer).map(LineString::new)
    }
}

/// Projects the geometry from `from` into `to`.
pub fn project<G: Reproject>(geometry: &G, from: Srid, to: Srid) -> Result<G, GeoError> {
    geometry.reproject(from, to)
}
