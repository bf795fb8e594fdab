//! Relay configuration loading from file and environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Top-level relay configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Command-surface settings.
    #[serde(default)]
    pub relay: RelayConfig,

    /// Operational HTTP settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Dictionary persistence settings.
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// The speaker pool, in selection order.
    #[serde(default = "default_speakers")]
    pub speakers: Vec<SpeakerConfig>,
}

/// Command-surface configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Prefix that marks a chat message as a command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

/// Network configuration for the operational HTTP listener.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Address to bind to.
    #[serde(default = "default_http_addr")]
    pub addr: SocketAddr,
}

/// Dictionary persistence configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictionaryConfig {
    /// Path to the SQLite dictionary file. When unset, entries live in
    /// memory only and are lost on restart.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "herald_relay=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// One speaker identity in the pool.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerConfig {
    /// Stable id, used in logs and the status surface.
    pub id: String,
    /// Display name; falls back to the id.
    #[serde(default)]
    pub name: Option<String>,
}

impl SpeakerConfig {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

fn default_command_prefix() -> String {
    "^".to_string()
}

fn default_http_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8750))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_speakers() -> Vec<SpeakerConfig> {
    vec![SpeakerConfig {
        id: "speaker-1".to_string(),
        name: None,
    }]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            relay: RelayConfig::default(),
            http: HttpConfig::default(),
            dictionary: DictionaryConfig::default(),
            logging: LoggingConfig::default(),
            speakers: default_speakers(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: default_http_addr(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `HERALD_COMMAND_PREFIX` overrides `relay.command_prefix`
/// - `HERALD_HTTP_ADDR` overrides `http.addr`
/// - `HERALD_DICT_PATH` overrides `dictionary.path`
/// - `HERALD_LOG` overrides `logging.level`
/// - `HERALD_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(prefix) = std::env::var("HERALD_COMMAND_PREFIX") {
        if !prefix.is_empty() {
            config.relay.command_prefix = prefix;
        }
    }
    if let Ok(addr) = std::env::var("HERALD_HTTP_ADDR") {
        if let Ok(parsed) = addr.parse() {
            config.http.addr = parsed;
        }
    }
    if let Ok(dict_path) = std::env::var("HERALD_DICT_PATH") {
        config.dictionary.path = Some(PathBuf::from(dict_path));
    }
    if let Ok(level) = std::env::var("HERALD_LOG") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("HERALD_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}
