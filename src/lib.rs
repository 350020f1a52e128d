#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod config;
pub mod error;
pub mod imagery;
pub mod path;
pub mod sample;
pub mod util;

#[doc(inline)]
pub use config::{Config, ImageryConfig, OutputFormat, ProjectedSystem};
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use path::{Cut, Path, PathError, cut_geographic};
#[doc(inline)]
pub use sample::{Sample, Sampler, Samples, Side, sample_road, sample_roads};

pub use roadside_geo::{Crs, GeoError, Hemisphere, Srid};
