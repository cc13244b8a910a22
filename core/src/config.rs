use crate::error::CoreError;
use realtime::RealTimeConfig;
use route::RouteOptimizerConfig;
use serde::{Deserialize, Serialize};
use solver::{DetectorConfig, ResolverConfig};
use std::fs;
use std::path::Path;

/// The construction-time config for the whole planning/live-operation
/// stack, loadable as one hand-editable TOML file — small knob files
/// closer to a `config.yaml` than a data-instance format.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub route: RouteOptimizerConfig,
    #[serde(default)]
    pub realtime: RealTimeConfig,
}

impl CoreConfig {
    pub fn from_toml_str(text: &str) -> Result<CoreConfig, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<CoreConfig, CoreError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| CoreError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }
}
