use log::{debug, info};
use roadside_geo::{Crs, GeoError, Reproject, Srid, Transformer, bearing};

#[cfg(feature = "tracing")]
use tracing::Level;

use crate::error::Error;
use crate::path::{Cut, Path};
use crate::sample::{Sample, SampleError, Side};

/// Samples longitude/latitude roads through a metric reference system.
///
/// ```rust
/// use roadside::{Path, Sampler, Side};
/// use roadside_geo::Srid;
///
/// let road = Path::from_wkt(
///     Srid::WGS84,
///     "LINESTRING (-117.112604 32.699876, -117.113581 32.699864, -117.114603 32.699855)",
/// ).unwrap();
///
/// let sampler = Sampler::new(Srid(32611), 10.0).unwrap();
/// let samples = sampler.sample(&road).unwrap();
///
/// assert_eq!(samples[0].side, Side::Right);
/// assert_eq!(samples[1].side, Side::Left);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    /// From longitude/latitude into the metric system
    projection: Transformer,
    interval: f64,
}

impl Sampler {
    /// Creates a sampler which steps `interval` meters at a time through the
    /// `projected` reference system, which must be metric.
    pub fn new(projected: Srid, interval: f64) -> Result<Self, Error> {
        if !(interval.is_finite() && interval > 0.0) {
            return Err(SampleError::InvalidInterval(interval).into());
        }

        if !Crs::resolve(projected)?.is_metric() {
            return Err(GeoError::InvalidReferenceSystem(projected).into());
        }

        Ok(Sampler {
            projection: Transformer::new(Srid::WGS84, projected)?,
            interval,
        })
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn projected(&self) -> Srid {
        self.projection.target()
    }

    /// Lazily walks the road, which must be in longitude/latitude.
    ///
    /// The road is projected up-front, so an error here means nothing was
    /// walked. Errors met part-way are yielded once, after which the
    /// iterator is exhausted.
    pub fn samples(&self, road: &Path) -> Result<Samples, Error> {
        if road.srid() != Srid::WGS84 {
            return Err(GeoError::InvalidReferenceSystem(road.srid()).into());
        }

        Ok(Samples {
            remaining: Some(road.transform(&self.projection)?),
            geographic: self.projection.inverted(),
            interval: self.interval,
            travelled: 0.0,
            pending: None,
        })
    }

    /// Walks the entire road, failing as a whole if any step fails.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip(road)))]
    pub fn sample(&self, road: &Path) -> Result<Vec<Sample>, Error> {
        let samples = self.samples(road)?.collect::<Result<Vec<_>, _>>()?;

        info!(
            "Sampled {} vertices into {} samples every {}m through {}",
            road.vertex_count(),
            samples.len(),
            self.interval,
            self.projected()
        );

        Ok(samples)
    }
}

/// The ordered samples of a single road.
///
/// Every step yields the right-hand sample, then the left-hand sample,
/// both taken at the first vertex of the road left to walk.
#[derive(Debug, Clone)]
pub struct Samples {
    /// The road not yet walked, in the metric system.
    remaining: Option<Path>,
    /// From the metric system back to longitude/latitude
    geographic: Transformer,
    interval: f64,
    travelled: f64,
    pending: Option<Sample>,
}

impl Samples {
    fn step(&mut self, remaining: Path) -> Result<(Sample, Sample), Error> {
        let (start, next) = (remaining.coords()[0], remaining.coords()[1]);

        // Only the two vertices needed are moved back, not the whole road.
        let origin = start.transform(&self.geographic)?;
        let toward = next.transform(&self.geographic)?;
        let heading = bearing(origin, toward)?;

        debug!(
            "{}m: heading {heading} from ({}, {})",
            self.travelled, origin.x, origin.y
        );

        let right = Sample::new(origin, heading, Side::Right, self.travelled);
        let left = Sample::new(origin, heading, Side::Left, self.travelled);

        match remaining.cut(self.interval) {
            Cut::Split { suffix, .. } => {
                self.remaining = Some(suffix);
                self.travelled += self.interval;
            }
            // Within a rounding error of the interval, nothing is left to walk.
            Cut::Whole(_) => self.remaining = None,
        }

        Ok((right, left))
    }
}

impl Iterator for Samples {
    type Item = Result<Sample, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(sample) = self.pending.take() {
            return Some(Ok(sample));
        }

        let remaining = self.remaining.take()?;

        // The final stretch, shorter than an interval, is never sampled.
        if remaining.length() <= self.interval {
            return None;
        }

        Some(self.step(remaining).map(|(right, left)| {
            self.pending = Some(left);
            right
        }))
    }
}

/// Samples the longitude/latitude `road` every `interval` meters, measured
/// through the `projected` reference system.
///
/// Emits a right-hand then left-hand sample at the start of every interval.
/// Any failure aborts the whole road, so no partial sequence is returned.
pub fn sample_road(road: &Path, projected: Srid, interval: f64) -> Result<Vec<Sample>, Error> {
    Sampler::new(projected, interval)?.sample(road)
}
