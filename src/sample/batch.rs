use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use roadside_geo::Srid;

#[cfg(feature = "tracing")]
use tracing::Level;

use crate::error::Error;
use crate::path::Path;
use crate::sample::{Sample, sample_road};

/// Samples many independent roads in parallel.
///
/// Each road succeeds or fails on its own. Results are returned in the
/// order of the roads given.
#[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip(roads)))]
pub fn sample_roads(roads: &[Path], projected: Srid, interval: f64) -> Vec<Result<Vec<Sample>, Error>> {
    roads
        .par_iter()
        .map(|road| sample_road(road, projected, interval))
        .collect()
}
