//! Walks a road at uniform intervals, emitting the two lateral viewing
//! directions at every step.

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use roadside_geo::normalize;

mod batch;
#[doc(hidden)]
pub mod error;
mod sampler;
#[cfg(test)]
mod test;

#[doc(inline)]
pub use batch::sample_roads;
#[doc(inline)]
pub use error::SampleError;
#[doc(inline)]
pub use sampler::{Sampler, Samples, sample_road};

/// Which side of the direction of travel a sample looks towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The clockwise rotation, in degrees, from the heading of travel.
    pub fn rotation(&self) -> f64 {
        match self {
            Side::Left => -90.0,
            Side::Right => 90.0,
        }
    }
}

/// A location on the road paired with a direction to look in.
///
/// Each sample drives exactly one imagery request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Degrees, WGS84
    pub longitude: f64,
    /// Degrees, WGS84
    pub latitude: f64,
    /// Viewing direction, degrees clockwise from true north in `[0, 360)`.
    pub bearing: f64,
    pub side: Side,
    /// The forward direction of travel the bearing was rotated from.
    pub heading: f64,
    /// Meters along the road from its first vertex.
    pub distance: f64,
}

impl Sample {
    pub(crate) fn new(position: Coord, heading: f64, side: Side, distance: f64) -> Self {
        Sample {
            longitude: position.x,
            latitude: position.y,
            bearing: normalize(heading + side.rotation()),
            side,
            heading,
            distance,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}
