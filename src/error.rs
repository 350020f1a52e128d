use std::fmt::{Display, Formatter};

use roadside_geo::GeoError;

use crate::config::ConfigError;
use crate::imagery::ImageryError;
use crate::impl_err;
use crate::path::PathError;
use crate::sample::SampleError;

/// Every failure the crate can surface.
#[derive(Debug)]
pub enum Error {
    Geo(GeoError),
    Path(PathError),
    Sample(SampleError),
    Imagery(ImageryError),
    Config(ConfigError),
    Io(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Geo(err) => write!(f, "{err}"),
            Error::Path(err) => write!(f, "{err}"),
            Error::Sample(err) => write!(f, "{err}"),
            Error::Imagery(err) => write!(f, "{err}"),
            Error::Config(err) => write!(f, "{err}"),
            Error::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Geo(err) => Some(err),
            Error::Path(err) => Some(err),
            Error::Sample(err) => Some(err),
            Error::Imagery(err) => Some(err),
            Error::Config(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl_err!(GeoError, Geo);
impl_err!(PathError, Path);
impl_err!(SampleError, Sample);
impl_err!(ImageryError, Imagery);
impl_err!(ConfigError, Config);
impl_err!(std::io::Error, Io);
