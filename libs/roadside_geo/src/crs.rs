//! Reference system identifiers, and the resolver which turns
//! an identifier into something that can be projected through.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use geo::Point;
use strum::Display as StrumDisplay;

use crate::error::GeoError;

/// An EPSG code naming a coordinate reference system.
///
/// ```rust
/// use roadside_geo::{Hemisphere, Srid};
///
/// assert_eq!(Srid::utm(11, Hemisphere::North), Srid(32611));
/// assert_eq!("EPSG:4326".parse::<Srid>().unwrap(), Srid::WGS84);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Srid(pub u32);

impl Srid {
    /// Geographic longitude/latitude on the WGS84 datum, in degrees.
    pub const WGS84: Srid = Srid(4326);
    /// Spherical (pseudo) mercator used by slippy maps, in meters.
    pub const WEB_MERCATOR: Srid = Srid(3857);

    const UTM_NORTH_BASE: u32 = 32600;
    const UTM_SOUTH_BASE: u32 = 32700;

    /// The WGS84 / UTM identifier for the given zone and hemisphere.
    /// Zones outside `1..=60` produce an identifier which will not resolve.
    pub const fn utm(zone: u8, hemisphere: Hemisphere) -> Srid {
        match hemisphere {
            Hemisphere::North => Srid(Self::UTM_NORTH_BASE + zone as u32),
            Hemisphere::South => Srid(Self::UTM_SOUTH_BASE + zone as u32),
        }
    }

    pub fn code(&self) -> u32 {
        self.0
    }
}

impl Display for Srid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

impl FromStr for Srid {
    type Err = GeoError;

    /// Accepts either a bare code (`32611`) or an authority-prefixed one (`EPSG:32611`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let code = match trimmed.split_once(':') {
            Some((authority, code)) if authority.eq_ignore_ascii_case("epsg") => code,
            Some(_) => {
                return Err(GeoError::InvalidInput(format!(
                    "Only EPSG identifiers are supported. Given: {trimmed}"
                )));
            }
            None => trimmed,
        };

        code.parse::<u32>().map(Srid).map_err(|_| {
            GeoError::InvalidInput(format!("Could not parse reference system. Given: {trimmed}"))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Hemisphere {
    North,
    South,
}

/// A resolved coordinate reference system.
///
/// Only the systems listed here can be resolved; anything else
/// fails with [`GeoError::InvalidReferenceSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crs {
    /// EPSG:4326, degrees.
    Geographic,
    /// EPSG:3857, meters.
    WebMercator,
    /// EPSG:326xx / EPSG:327xx, meters.
    Utm { zone: u8, hemisphere: Hemisphere },
}

impl Crs {
    pub const UTM_ZONES: u8 = 60;
    const UTM_ZONE_WIDTH: f64 = 6.0;

    /// Resolves the identifier into the reference system it names.
    pub fn resolve(srid: Srid) -> Result<Crs, GeoError> {
        let hemisphere = match srid.0 {
            4326 => return Ok(Crs::Geographic),
            3857 => return Ok(Crs::WebMercator),
            32601..=32660 => Hemisphere::North,
            32701..=32760 => Hemisphere::South,
            _ => return Err(GeoError::InvalidReferenceSystem(srid)),
        };

        let zone = (srid.0 % 100) as u8;
        Ok(Crs::Utm { zone, hemisphere })
    }

    /// Picks the UTM zone containing the given longitude/latitude point.
    /// The Norway and Svalbard zone exceptions are not applied.
    pub fn utm_for(point: Point) -> Result<Crs, GeoError> {
        let (lng, lat) = point.x_y();

        if !(-180.0..=180.0).contains(&lng) || !(-80.0..=84.0).contains(&lat) {
            return Err(GeoError::ProjectionDomain {
                srid: Srid::WGS84,
                x: lng,
                y: lat,
            });
        }

        let zone = (((lng + 180.0) / Self::UTM_ZONE_WIDTH).floor() as u8 + 1).min(Self::UTM_ZONES);
        let hemisphere = if lat >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        };

        Ok(Crs::Utm { zone, hemisphere })
    }

    pub fn srid(&self) -> Srid {
        match self {
            Crs::Geographic => Srid::WGS84,
            Crs::WebMercator => Srid::WEB_MERCATOR,
            Crs::Utm { zone, hemisphere } => Srid::utm(*zone, *hemisphere),
        }
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self, Crs::Geographic)
    }

    /// Whether the linear unit of the system is the meter.
    pub fn is_metric(&self) -> bool {
        !self.is_geographic()
    }

    /// Longitude of the central meridian of a UTM zone, in degrees.
    pub fn central_meridian(zone: u8) -> f64 {
        (zone as f64 - 1.0) * Self::UTM_ZONE_WIDTH - 180.0 + Self::UTM_ZONE_WIDTH / 2.0
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Crs::Geographic => write!(f, "WGS84 ({})", self.srid()),
            Crs::WebMercator => write!(f, "Web Mercator ({})", self.srid()),
            Crs::Utm { zone, hemisphere } => {
                write!(f, "UTM zone {zone} {hemisphere} ({})", self.srid())
            }
        }
    }
}

impl TryFrom<Srid> for Crs {
    type Error = GeoError;

    fn try_from(srid: Srid) -> Result<Self, Self::Error> {
        Crs::resolve(srid)
    }
}
