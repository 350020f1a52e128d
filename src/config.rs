//! Runtime configuration, read from the environment.
//!
//! An optional `.env` file in the working directory is loaded first.

use std::env;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use log::debug;
use roadside_geo::{Crs, Srid};
use strum::{Display as StrumDisplay, EnumString};

use crate::error::Error;
use crate::path::Path;

pub const INTERVAL_KEY: &str = "ROADSIDE_INTERVAL";
pub const SRID_KEY: &str = "ROADSIDE_SRID";
pub const FORMAT_KEY: &str = "ROADSIDE_FORMAT";
pub const OUTPUT_DIR_KEY: &str = "ROADSIDE_OUTPUT_DIR";
pub const API_KEY_KEY: &str = "STREETVIEW_API_KEY";

pub const DEFAULT_INTERVAL: f64 = 10.0;
pub const DEFAULT_OUTPUT_DIR: &str = "imagery";

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
            ConfigError::Invalid { key, value, reason } => {
                write!(f, "{key}={value:?} is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// The metric reference system roads are measured through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectedSystem {
    /// The UTM zone holding the first vertex of each road
    Auto,
    Fixed(Srid),
}

impl ProjectedSystem {
    pub fn resolve(&self, road: &Path) -> Result<Srid, Error> {
        match self {
            ProjectedSystem::Fixed(srid) => Ok(*srid),
            ProjectedSystem::Auto => {
                let crs = Crs::utm_for(road.first().into())?;
                debug!("Resolved {crs} from the first vertex of the road");
                Ok(crs.srid())
            }
        }
    }
}

impl FromStr for ProjectedSystem {
    type Err = roadside_geo::GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(ProjectedSystem::Auto);
        }

        let srid = s.parse::<Srid>()?;
        Crs::resolve(srid)?;
        Ok(ProjectedSystem::Fixed(srid))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// `longitude,latitude,bearing`, one sample per line
    Csv,
    /// One JSON object per sample, per line
    Json,
}

/// How roads are sampled and written.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub interval: f64,
    pub projection: ProjectedSystem,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            interval: DEFAULT_INTERVAL,
            projection: ProjectedSystem::Auto,
            format: OutputFormat::Csv,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    /// for anything absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let interval = match lookup(INTERVAL_KEY) {
            None => defaults.interval,
            Some(value) => {
                let interval = value.trim().parse::<f64>().map_err(|err| ConfigError::Invalid {
                    key: INTERVAL_KEY,
                    value: value.clone(),
                    reason: err.to_string(),
                })?;

                if !(interval.is_finite() && interval > 0.0) {
                    return Err(ConfigError::Invalid {
                        key: INTERVAL_KEY,
                        value,
                        reason: "must be a positive number of meters".to_string(),
                    });
                }

                interval
            }
        };

        let projection = match lookup(SRID_KEY) {
            None => defaults.projection,
            Some(value) => value.parse::<ProjectedSystem>().map_err(|err| ConfigError::Invalid {
                key: SRID_KEY,
                value: value.clone(),
                reason: err.to_string(),
            })?,
        };

        let format = match lookup(FORMAT_KEY) {
            None => defaults.format,
            Some(value) => value.trim().parse::<OutputFormat>().map_err(|_| ConfigError::Invalid {
                key: FORMAT_KEY,
                value: value.clone(),
                reason: "expected csv or json".to_string(),
            })?,
        };

        Ok(Config {
            interval,
            projection,
            format,
        })
    }
}

/// Where, and with which credentials, imagery is retrieved.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageryConfig {
    pub api_key: String,
    pub output_directory: PathBuf,
}

impl ImageryConfig {
    pub fn new(api_key: impl Into<String>, output_directory: impl Into<PathBuf>) -> Self {
        ImageryConfig {
            api_key: api_key.into(),
            output_directory: output_directory.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        ImageryConfig::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_KEY)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing(API_KEY_KEY))?;

        let output_directory = lookup(OUTPUT_DIR_KEY)
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

        Ok(ImageryConfig::new(api_key, output_directory))
    }
}

fn load_dotenv() {
    // A missing `.env` is not an error, the environment may be set directly.
    if let Ok(path) = dotenv::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();

        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).expect("defaults must load");
        assert_eq!(config, Config::default());
        assert_eq!(config.interval, 10.0);
        assert_eq!(config.projection, ProjectedSystem::Auto);
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn reads_every_key() {
        let config = Config::from_lookup(lookup(&[
            (INTERVAL_KEY, "25.5"),
            (SRID_KEY, "EPSG:32611"),
            (FORMAT_KEY, "JSON"),
        ]))
        .expect("config must load");

        assert_eq!(config.interval, 25.5);
        assert_eq!(config.projection, ProjectedSystem::Fixed(Srid(32611)));
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn rejects_bad_intervals() {
        for value in ["0", "-3", "ten", "NaN", "inf"] {
            let result = Config::from_lookup(lookup(&[(INTERVAL_KEY, value)]));
            assert!(
                matches!(result, Err(ConfigError::Invalid { key: INTERVAL_KEY, .. })),
                "{value} must be rejected"
            );
        }
    }

    #[test]
    fn rejects_unknown_systems() {
        let result = Config::from_lookup(lookup(&[(SRID_KEY, "99999")]));
        assert!(matches!(result, Err(ConfigError::Invalid { key: SRID_KEY, .. })));

        let result = Config::from_lookup(lookup(&[(FORMAT_KEY, "xml")]));
        assert!(matches!(result, Err(ConfigError::Invalid { key: FORMAT_KEY, .. })));
    }

    #[test]
    fn auto_resolves_utm_zone() {
        let road = Path::from_wkt(
            Srid::WGS84,
            "LINESTRING (-117.112604 32.699876, -117.113581 32.699864)",
        )
        .expect("road must parse");

        let srid = ProjectedSystem::Auto.resolve(&road).expect("zone must resolve");
        assert_eq!(srid, Srid(32611));

        let fixed = ProjectedSystem::Fixed(Srid::WEB_MERCATOR);
        assert_eq!(fixed.resolve(&road).expect("fixed"), Srid::WEB_MERCATOR);
    }

    #[test]
    fn imagery_requires_key() {
        let result = ImageryConfig::from_lookup(lookup(&[(OUTPUT_DIR_KEY, "out")]));
        assert_eq!(result, Err(ConfigError::Missing(API_KEY_KEY)));

        let config = ImageryConfig::from_lookup(lookup(&[(API_KEY_KEY, "secret")]))
            .expect("key is set");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.output_directory, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }
}
