#![doc = include_str!("../docs/geo.md")]

/// WGS84 semi-major axis, in meters.
pub const WGS84_SEMI_MAJOR: f64 = 6378137.0;
/// WGS84 flattening.
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257223563;

/// Half the width of the EPSG:3857 square, in meters.
pub const WEB_MERCATOR_EXTENT: f64 = 20037508.342789244;
/// Latitude at which the EPSG:3857 square is clipped.
pub const WEB_MERCATOR_MAX_LAT: f64 = 85.051128779806604;

pub mod bearing;
#[doc(hidden)]
pub mod coord;
pub mod crs;
#[doc(hidden)]
pub mod error;
pub mod project;


#[doc(inline)]
pub use bearing::{bearing, normalize};
#[doc(inline)]
pub use coord::point::validate;
#[doc(inline)]
pub use crs::{Crs, Hemisphere, Srid};
#[doc(inline)]
pub use error::GeoError;
#[doc(inline)]
pub use project::{Projection, Reproject, Transformer};
