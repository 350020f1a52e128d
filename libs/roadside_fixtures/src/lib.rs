//! Shared geometry fixtures for the `roadside` tests and benchmarks.
//!
//! Constants are WKT strings in longitude/latitude (EPSG:4326), alongside
//! the EPSG code of the UTM zone which covers them.

use std::path::PathBuf;

/// Three vertices of a residential street in San Diego, CA.
pub const SAN_DIEGO: &str =
    "LINESTRING (-117.112604 32.699876, -117.113581 32.699864, -117.114603 32.699855)";
/// WGS84 / UTM zone 11N
pub const SAN_DIEGO_SRID: u32 = 32611;

/// A stretch of coastal road through La Jolla, CA, running south-east.
pub const LA_JOLLA: &str = "LINESTRING (-117.271614 32.850152, -117.271228 32.849297, -117.270778 32.848391, -117.270457 32.847617, -117.270135 32.846691, -117.269856 32.845859, -117.269513 32.844959, -117.269084 32.843978, -117.268676 32.843087)";
pub const LA_JOLLA_SRID: u32 = 32611;

/// Runs due north along the central meridian of UTM zone 31.
pub const MERIDIAN: &str = "LINESTRING (3 45, 3 45.001, 3 45.0025)";
/// WGS84 / UTM zone 31N
pub const MERIDIAN_SRID: u32 = 32631;

/// Crosses the antimeridian eastward, north of Taveuni, Fiji.
pub const ANTIMERIDIAN: &str = "LINESTRING (179.999 -16.6, -179.999 -16.6)";
/// WGS84 / UTM zone 60S
pub const ANTIMERIDIAN_SRID: u32 = 32760;

/// Files stored under `data/`.
pub const SAN_DIEGO_FILE: &str = "san_diego.wkt";
pub const LA_JOLLA_FILE: &str = "la_jolla.wkt";

/// Resolves the absolute path of a fixture file stored under `data/`.
pub fn fixture_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(file)
}
