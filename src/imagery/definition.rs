use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use geo::Coord;
use serde::Serialize;

use crate::config::ImageryConfig;
use crate::impl_err;
use crate::sample::Sample;

/// Characters of geohash used to name the image of a sample, ~5m across.
const KEY_PRECISION: usize = 9;

/// Everything an imagery provider is handed to retrieve one oriented image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRequest {
    pub longitude: f64,
    pub latitude: f64,
    pub bearing: f64,
    pub output_directory: PathBuf,
    #[serde(skip)]
    pub api_key: String,
    /// A stable file stem for the image, unique per location and bearing.
    pub name: String,
}

impl ImageRequest {
    pub fn new(sample: &Sample, config: &ImageryConfig) -> Result<Self, ImageryError> {
        let location = Coord {
            x: sample.longitude,
            y: sample.latitude,
        };

        let hash = geohash::encode(location, KEY_PRECISION)
            .map_err(|err| ImageryError::InvalidRequest(format!("{err:?}")))?;

        Ok(ImageRequest {
            longitude: sample.longitude,
            latitude: sample.latitude,
            bearing: sample.bearing,
            output_directory: config.output_directory.clone(),
            api_key: config.api_key.clone(),
            name: format!("{hash}_{:03}", sample.bearing.floor() as u16),
        })
    }
}

/// What became of a single request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The image was retrieved, and persisted at the given location.
    Saved(PathBuf),
    /// No panorama exists near the requested point.
    NoPanorama,
}

#[derive(Debug)]
pub enum ImageryError {
    /// The request could not be formed from the sample.
    InvalidRequest(String),
    /// The provider could not be reached, or refused the request.
    Provider(String),
    Io(std::io::Error),
}

impl Display for ImageryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageryError::InvalidRequest(reason) => write!(f, "invalid image request: {reason}"),
            ImageryError::Provider(reason) => write!(f, "imagery provider failed: {reason}"),
            ImageryError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for ImageryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageryError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl_err!(std::io::Error, ImageryError, Io);

/// The collaborator responsible for resolving the nearest panorama to a
/// request, retrieving the image, and persisting it.
///
/// Transport, authentication, caching and rate limiting all belong to
/// the implementor.
pub trait ImageryProvider {
    fn fetch(&self, request: &ImageRequest) -> Result<FetchOutcome, ImageryError>;
}

impl<P: ImageryProvider + ?Sized> ImageryProvider for &P {
    fn fetch(&self, request: &ImageRequest) -> Result<FetchOutcome, ImageryError> {
        (**self).fetch(request)
    }
}
