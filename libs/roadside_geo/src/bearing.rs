//! Initial great-circle bearings between longitude/latitude points.

use geo::Point;

use crate::coord::point::validate;
use crate::error::GeoError;

const FULL_TURN: f64 = 360.0;

/// Folds any finite angle, in degrees, into `[0, 360)`.
///
/// ```rust
/// use roadside_geo::normalize;
///
/// assert_eq!(normalize(-90.0), 270.0);
/// assert_eq!(normalize(450.0), 90.0);
/// ```
#[inline]
pub fn normalize(degrees: f64) -> f64 {
    let folded = degrees.rem_euclid(FULL_TURN);

    // Tiny negative inputs round up onto the full turn.
    if folded >= FULL_TURN { 0.0 } else { folded }
}

/// The initial bearing, in degrees clockwise from true north, of the
/// great-circle path leaving `from` towards `to`. Always within `[0, 360)`.
///
/// Both points are `(longitude, latitude)` in degrees. Either point having a
/// component which is not a finite real number fails with
/// [`GeoError::InvalidInput`], rather than producing a plausible bearing.
///
/// ### Note
/// Coincident points have no direction of travel, and by convention
/// return a bearing of `0`.
///
/// ```rust
/// use roadside_geo::bearing;
///
/// // Heading due east along the equator.
/// let east = bearing((0.0, 0.0), (1.0, 0.0)).unwrap();
/// assert!((east - 90.0).abs() < 1e-9);
/// ```
pub fn bearing(from: impl Into<Point>, to: impl Into<Point>) -> Result<f64, GeoError> {
    let from = validate(from)?;
    let to = validate(to)?;

    let lat1 = from.y().to_radians();
    let lat2 = to.y().to_radians();
    let delta_lng = (to.x() - from.x()).to_radians();

    let x = delta_lng.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

    Ok(normalize(x.atan2(y).to_degrees() + FULL_TURN))
}
