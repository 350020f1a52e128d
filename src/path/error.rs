use std::fmt::{Display, Formatter};

use roadside_geo::GeoError;

use crate::impl_err;

#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// The vertices do not describe a polyline with a defined length,
    /// such as fewer than two vertices or a zero-length segment.
    Degenerate(String),
    /// The path could not be moved between reference systems.
    Geo(GeoError),
    /// The input could not be read as a WKT `LINESTRING`.
    Wkt(String),
}

impl Display for PathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::Degenerate(reason) => write!(f, "degenerate path: {reason}"),
            PathError::Geo(err) => write!(f, "{err}"),
            PathError::Wkt(reason) => write!(f, "invalid wkt: {reason}"),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathError::Geo(err) => Some(err),
            _ => None,
        }
    }
}

impl_err!(GeoError, PathError, Geo);
