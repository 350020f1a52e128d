use geo::{Coord, Point};

use crate::error::GeoError;

/// Returns true when both components of the coordinate are finite.
#[inline]
pub fn is_finite(coord: &Coord) -> bool {
    coord.x.is_finite() && coord.y.is_finite()
}

/// Converts the value into a [`Point`], rejecting anything
/// which is not made of two finite real numbers.
///
/// ```rust
/// use roadside_geo::validate;
///
/// assert!(validate((-117.1, 32.7)).is_ok());
/// assert!(validate((f64::NAN, 32.7)).is_err());
/// ```
pub fn validate(value: impl Into<Point>) -> Result<Point, GeoError> {
    let point = value.into();

    if !is_finite(&point.0) {
        return Err(GeoError::InvalidInput(format!(
            "Coordinates must be finite. Given: ({}, {})",
            point.x(),
            point.y()
        )));
    }

    Ok(point)
}
