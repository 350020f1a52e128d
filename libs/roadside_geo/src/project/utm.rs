//! Krüger's series for the transverse mercator, truncated at the third
//! power of the third flattening. Sub-millimeter within a zone.
//!
//! See [Karney (2011)](https://doi.org/10.1007/s00190-011-0445-3).

use geo::Coord;

use crate::coord::point::is_finite;
use crate::crs::{Crs, Hemisphere, Srid};
use crate::error::GeoError;
use crate::project::{Projection, TransverseMercator};
use crate::{WGS84_FLATTENING, WGS84_SEMI_MAJOR};

const SCALE_FACTOR: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

const MIN_LATITUDE: f64 = -80.0;
const MAX_LATITUDE: f64 = 84.0;
/// Furthest a longitude may sit from the central meridian.
const MAX_MERIDIAN_OFFSET: f64 = 45.0;
/// Degrees the inverse series may overshoot the edge of the domain by.
const EDGE_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Series {
    /// Rectifying radius, scaled by the central scale factor.
    radius: f64,
    eccentricity: f64,
    alpha: [f64; 3],
    beta: [f64; 3],
    delta: [f64; 3],
}

impl Series {
    fn wgs84() -> Self {
        let f = WGS84_FLATTENING;
        let n = f / (2.0 - f);
        let (n2, n3) = (n * n, n * n * n);

        let rectifying = WGS84_SEMI_MAJOR / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0);

        Series {
            radius: SCALE_FACTOR * rectifying,
            eccentricity: 2.0 * n.sqrt() / (1.0 + n),
            alpha: [
                n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0,
                13.0 * n2 / 48.0 - 3.0 * n3 / 5.0,
                61.0 * n3 / 240.0,
            ],
            beta: [
                n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0,
                n2 / 48.0 + n3 / 15.0,
                17.0 * n3 / 480.0,
            ],
            delta: [
                2.0 * n - 2.0 * n2 / 3.0 - 2.0 * n3,
                7.0 * n2 / 3.0 - 8.0 * n3 / 5.0,
                56.0 * n3 / 15.0,
            ],
        }
    }
}

/// Folds a longitude difference into `(-180, 180]`.
fn wrap(offset: f64) -> f64 {
    let wrapped = (offset + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

impl TransverseMercator {
    pub fn new(zone: u8, hemisphere: Hemisphere) -> Self {
        TransverseMercator {
            zone,
            hemisphere,
            series: Series::wgs84(),
        }
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    fn central_meridian(&self) -> f64 {
        Crs::central_meridian(self.zone)
    }

    fn false_northing(&self) -> f64 {
        match self.hemisphere {
            Hemisphere::North => 0.0,
            Hemisphere::South => FALSE_NORTHING_SOUTH,
        }
    }

    /// Whether the longitude/latitude lies inside the region this zone projects.
    fn contains(&self, lng: f64, lat: f64) -> bool {
        self.contains_within(lng, lat, 0.0)
    }

    fn contains_within(&self, lng: f64, lat: f64, margin: f64) -> bool {
        (-180.0..=180.0).contains(&lng)
            && (MIN_LATITUDE - margin..=MAX_LATITUDE + margin).contains(&lat)
            && wrap(lng - self.central_meridian()).abs() <= MAX_MERIDIAN_OFFSET + margin
    }

    /// Pulls a point within the edge tolerance back onto the domain.
    fn clamp(&self, lng: f64, lat: f64) -> Coord {
        let offset = wrap(lng - self.central_meridian());
        let lng = match offset.abs() > MAX_MERIDIAN_OFFSET {
            true => {
                let offset = offset.clamp(-MAX_MERIDIAN_OFFSET, MAX_MERIDIAN_OFFSET);
                wrap(self.central_meridian() + offset)
            }
            false => lng,
        };

        Coord {
            x: lng,
            y: lat.clamp(MIN_LATITUDE, MAX_LATITUDE),
        }
    }
}

impl Projection for TransverseMercator {
    fn srid(&self) -> Srid {
        Srid::utm(self.zone, self.hemisphere)
    }

    fn forward(&self, geographic: Coord) -> Result<Coord, GeoError> {
        let Coord { x: lng, y: lat } = geographic;
        if !is_finite(&geographic) || !self.contains(lng, lat) {
            return Err(GeoError::ProjectionDomain {
                srid: Srid::WGS84,
                x: lng,
                y: lat,
            });
        }

        let Series {
            radius,
            eccentricity: e,
            alpha,
            ..
        } = self.series;

        let phi = lat.to_radians();
        let lambda = wrap(lng - self.central_meridian()).to_radians();

        // Conformal latitude, as its tangent
        let sin_phi = phi.sin();
        let t = (sin_phi.atanh() - e * (e * sin_phi).atanh()).sinh();

        let xi_prime = (t / lambda.cos()).atan();
        let eta_prime = (lambda.sin() / (1.0 + t * t).sqrt()).atanh();

        let (xi, eta) = alpha.iter().enumerate().fold(
            (xi_prime, eta_prime),
            |(xi, eta), (j, coefficient)| {
                let k = 2.0 * (j + 1) as f64;
                (
                    xi + coefficient * (k * xi_prime).sin() * (k * eta_prime).cosh(),
                    eta + coefficient * (k * xi_prime).cos() * (k * eta_prime).sinh(),
                )
            },
        );

        Ok(Coord {
            x: FALSE_EASTING + radius * eta,
            y: self.false_northing() + radius * xi,
        })
    }

    fn inverse(&self, projected: Coord) -> Result<Coord, GeoError> {
        let domain_error = || GeoError::ProjectionDomain {
            srid: self.srid(),
            x: projected.x,
            y: projected.y,
        };

        if !is_finite(&projected) {
            return Err(domain_error());
        }

        let Series {
            radius,
            beta,
            delta,
            ..
        } = self.series;

        let xi = (projected.y - self.false_northing()) / radius;
        let eta = (projected.x - FALSE_EASTING) / radius;

        let (xi_prime, eta_prime) =
            beta.iter()
                .enumerate()
                .fold((xi, eta), |(xi_prime, eta_prime), (j, coefficient)| {
                    let k = 2.0 * (j + 1) as f64;
                    (
                        xi_prime - coefficient * (k * xi).sin() * (k * eta).cosh(),
                        eta_prime - coefficient * (k * xi).cos() * (k * eta).sinh(),
                    )
                });

        // Conformal latitude, mapped back to the geodetic latitude.
        let chi = (xi_prime.sin() / eta_prime.cosh()).asin();
        let phi = delta
            .iter()
            .enumerate()
            .fold(chi, |phi, (j, coefficient)| {
                phi + coefficient * (2.0 * (j + 1) as f64 * chi).sin()
            });

        let lambda = eta_prime.sinh().atan2(xi_prime.cos());

        let lat = phi.to_degrees();
        let lng = wrap(self.central_meridian() + lambda.to_degrees());

        match lat.is_finite() && self.contains_within(lng, lat, EDGE_TOLERANCE) {
            true => Ok(self.clamp(lng, lat)),
            false => Err(domain_error()),
        }
    }
}
