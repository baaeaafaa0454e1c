//! Node configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! `THERMO__SECTION__KEY` environment variables.

use crate::error::NodeError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use thermo_acquisition::{EngineSettings, SimulatedAdcConfig};
use thermo_protocol::LinkSettings;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "thermo-node.toml";

/// Dispatcher settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchSettings {
    /// Longest wait for the link to accept one byte (ms)
    pub transmit_timeout_ms: u64,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            transmit_timeout_ms: 100,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of plain text
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Metrics exporter settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Prometheus scrape address; no exporter when unset
    pub listen: Option<SocketAddr>,
}

/// Complete node configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub link: LinkSettings,
    pub dispatch: DispatchSettings,
    pub acquisition: EngineSettings,
    pub adc: SimulatedAdcConfig,
    pub log: LogSettings,
    pub metrics: MetricsSettings,
}

impl NodeConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, NodeError> {
        Self::load_with(path, environment())
    }

    /// Load configuration with a given environment layer on top of the file
    pub fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, NodeError> {
        let (file, required) = match path {
            Some(p) => (p.to_string_lossy().into_owned(), true),
            None => (DEFAULT_CONFIG_PATH.to_string(), false),
        };

        let config = Config::builder()
            .add_source(File::new(&file, FileFormat::Toml).required(required))
            .add_source(env)
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// `THERMO__SECTION__KEY` variables
pub fn environment() -> Environment {
    Environment::with_prefix("THERMO")
        .separator("__")
        .try_parsing(true)
}
