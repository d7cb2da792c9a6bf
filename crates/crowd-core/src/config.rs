//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `crowd-config.yaml` next to the
//! server binary's working directory. Every field has a default, so an
//! absent or partial file still yields a complete [`CrowdConfig`]. The
//! default location set is the compiled-in registry from
//! [`registry::default_locations`](crate::registry::default_locations).

use std::path::Path;

use crowd_types::Location;
use serde::Deserialize;

use crate::clock::TimestampPolicy;
use crate::generator::GenerationStrategy;
use crate::registry::default_locations;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `crowd-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrowdConfig {
    /// HTTP bind settings.
    #[serde(default)]
    pub server: HttpConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Reading generation strategy and its parameters.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Timestamp capture settings.
    #[serde(default)]
    pub clock: ClockConfig,

    /// History retention settings.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Critical threshold for locations that define none.
    #[serde(default = "default_threshold")]
    pub default_threshold: u32,

    /// The location registry, in reporting order.
    #[serde(default = "default_locations")]
    pub locations: Vec<Location>,
}

impl Default for CrowdConfig {
    fn default() -> Self {
        Self {
            server: HttpConfig::default(),
            logging: LoggingConfig::default(),
            generator: GeneratorConfig::default(),
            clock: ClockConfig::default(),
            history: HistoryConfig::default(),
            default_threshold: default_threshold(),
            locations: default_locations(),
        }
    }
}

impl CrowdConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment overrides are not applied here; see
    /// [`HttpConfig::apply_env_overrides`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// HTTP bind settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl HttpConfig {
    /// Override bind settings with `CROWD_HOST` / `CROWD_PORT` when set.
    ///
    /// Returns the rejected `CROWD_PORT` value, if any, so the caller can
    /// report it once logging is up.
    #[must_use]
    pub fn apply_env_overrides(&mut self) -> Option<String> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using an arbitrary variable lookup.
    ///
    /// A port value that does not parse as `u16` leaves the port unchanged
    /// and is returned.
    #[must_use]
    pub fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        if let Some(val) = lookup("CROWD_HOST") {
            self.host = val;
        }
        let val = lookup("CROWD_PORT")?;
        match val.parse::<u16>() {
            Ok(port) => {
                self.port = port;
                None
            }
            Err(_) => Some(val),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Which generation strategy is active for the deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Uniform in `[0, threshold + margin]`.
    #[default]
    ThresholdRelative,
    /// Uniform in `[min, max]`.
    AbsoluteRange,
    /// Bounded walk from the previous reading.
    RandomWalk,
}

/// Reading generator configuration.
///
/// Only the parameters relevant to `strategy` are consulted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratorConfig {
    /// Active strategy.
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Headroom above the threshold (threshold-relative, random walk).
    #[serde(default = "default_margin")]
    pub margin: u32,

    /// Lower bound (absolute range).
    #[serde(default = "default_range_min")]
    pub min: u32,

    /// Upper bound (absolute range).
    #[serde(default = "default_range_max")]
    pub max: u32,

    /// Maximum step between successive readings (random walk).
    #[serde(default = "default_delta")]
    pub delta: u32,

    /// Fixed RNG seed for reproducible runs. OS-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Resolve the configured kind and parameters into a strategy.
    pub const fn strategy(&self) -> GenerationStrategy {
        match self.strategy {
            StrategyKind::ThresholdRelative => GenerationStrategy::ThresholdRelative {
                margin: self.margin,
            },
            StrategyKind::AbsoluteRange => GenerationStrategy::AbsoluteRange {
                min: self.min,
                max: self.max,
            },
            StrategyKind::RandomWalk => GenerationStrategy::RandomWalk {
                delta: self.delta,
                margin: self.margin,
            },
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            margin: default_margin(),
            min: default_range_min(),
            max: default_range_max(),
            delta: default_delta(),
            seed: None,
        }
    }
}

/// Timestamp capture configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClockConfig {
    /// IANA zone name used for timestamps. Follows daylight saving.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Fixed offset east of UTC in minutes. Overrides `timezone` when set.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,

    /// Whether a snapshot shares one timestamp across all entries.
    #[serde(default)]
    pub timestamp_policy: TimestampPolicy,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            utc_offset_minutes: None,
            timestamp_policy: TimestampPolicy::default(),
        }
    }
}

/// History retention configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct HistoryConfig {
    /// Keep at most this many readings per location. Unbounded when absent.
    #[serde(default)]
    pub max_per_location: Option<usize>,
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_threshold() -> u32 {
    800
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_timezone() -> String {
    "Europe/Stockholm".to_owned()
}

const fn default_margin() -> u32 {
    40
}

const fn default_range_min() -> u32 {
    5
}

const fn default_range_max() -> u32 {
    1000
}

const fn default_delta() -> u32 {
    10
}
