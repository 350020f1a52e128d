use std::path::PathBuf;

use log::{debug, info, warn};

#[cfg(feature = "tracing")]
use tracing::Level;

use crate::config::ImageryConfig;
use crate::imagery::{FetchOutcome, ImageRequest, ImageryError, ImageryProvider};
use crate::sample::Sample;

/// The per-sample results of a harvest, in sample order.
#[derive(Debug, Default)]
pub struct HarvestReport {
    pub saved: Vec<PathBuf>,
    /// Indices of samples with no panorama nearby.
    pub skipped: Vec<usize>,
    /// Indices of samples whose retrieval failed, with the reason.
    pub failed: Vec<(usize, ImageryError)>,
}

impl HarvestReport {
    pub fn attempted(&self) -> usize {
        self.saved.len() + self.skipped.len() + self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Hands every sample, in order, to the provider.
///
/// A missing panorama is a benign skip. A failed retrieval is recorded
/// against its sample and the harvest moves on; retrying is left to the
/// provider.
#[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip_all))]
pub fn harvest<P: ImageryProvider>(
    samples: &[Sample],
    provider: &P,
    config: &ImageryConfig,
) -> HarvestReport {
    let mut report = HarvestReport::default();

    for (index, sample) in samples.iter().enumerate() {
        let outcome = ImageRequest::new(sample, config).and_then(|request| provider.fetch(&request));

        match outcome {
            Ok(FetchOutcome::Saved(path)) => {
                debug!("Sample {index} saved to {}", path.display());
                report.saved.push(path);
            }
            Ok(FetchOutcome::NoPanorama) => {
                debug!("Sample {index} has no panorama nearby");
                report.skipped.push(index);
            }
            Err(err) => {
                warn!("Sample {index} could not be retrieved: {err}");
                report.failed.push((index, err));
            }
        }
    }

    info!(
        "Harvested {} samples: {} saved, {} skipped, {} failed",
        samples.len(),
        report.saved.len(),
        report.skipped.len(),
        report.failed.len()
    );

    report
}
