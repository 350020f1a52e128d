use std::fmt::{Display, Formatter};

use crate::crs::Srid;

#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    /// The identifier does not name a reference system the resolver knows.
    InvalidReferenceSystem(Srid),
    /// The coordinate lies outside the valid domain of the reference system.
    ProjectionDomain { srid: Srid, x: f64, y: f64 },
    /// A coordinate handed to a calculation was not a finite real number.
    InvalidInput(String),
}

impl Display for GeoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoError::InvalidReferenceSystem(srid) => {
                write!(f, "invalid reference system: {srid}")
            }
            GeoError::ProjectionDomain { srid, x, y } => {
                write!(f, "coordinate ({x}, {y}) is outside the domain of {srid}")
            }
            GeoError::InvalidInput(reason) => write!(f, "invalid input: {reason}"),
        }
    }
}

impl std::error::Error for GeoError {}
