//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.emotioneye/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EmotionEyeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Host the client considers itself served from; picks the endpoint.
    pub host: Option<String>,
    /// Origin the relative API path is resolved against for non-local hosts.
    pub origin: Option<String>,
    pub local_base_url: Option<String>,
    pub api_prefix: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILE: &str = "emotioneye.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub host: String,
    pub origin: String,
    pub local_base_url: String,
    pub api_prefix: String,
    pub timeout: Duration,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

/// Values taken from the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.emotioneye/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".emotioneye").join("config.toml"))
}

/// Load config from `~/.emotioneye/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `EmotionEyeConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<EmotionEyeConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(EmotionEyeConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<EmotionEyeConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(EmotionEyeConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: EmotionEyeConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# EmotionEye Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                    # "off", "error", "warn", "info", "debug", "trace"
# log_file = "emotioneye.log"

# [service]
# host = "localhost"                     # Or set EMOTIONEYE_HOST; local hosts use local_base_url
# origin = "https://emotioneye.example"  # Or set EMOTIONEYE_ORIGIN; defaults to https://<host>
# local_base_url = "http://localhost:5000"
# api_prefix = "/api"                    # Relative API path on the origin
# timeout_secs = 30
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// The configured `log_level` when it names no known level.
///
/// Resolution runs before the logger exists, so callers surface this
/// themselves.
pub fn unknown_log_level(config: &EmotionEyeConfig) -> Option<&str> {
    config
        .general
        .log_level
        .as_deref()
        .filter(|level| LevelFilter::from_str(level).is_err())
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &EmotionEyeConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an explicit environment lookup.
pub fn resolve_with(
    config: &EmotionEyeConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Host: CLI → env → config → default
    let host = cli
        .host
        .clone()
        .or_else(|| env("EMOTIONEYE_HOST"))
        .or_else(|| config.service.host.clone())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    // Origin: env → config → https://<host>
    let origin = env("EMOTIONEYE_ORIGIN")
        .or_else(|| config.service.origin.clone())
        .unwrap_or_else(|| format!("https://{host}"));

    let local_base_url = env("EMOTIONEYE_LOCAL_URL")
        .or_else(|| config.service.local_base_url.clone())
        .unwrap_or_else(|| DEFAULT_LOCAL_BASE_URL.to_string());

    let api_prefix = env("EMOTIONEYE_API_PREFIX")
        .or_else(|| config.service.api_prefix.clone())
        .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());

    if let Some(level) = unknown_log_level(config) {
        warn!("Unknown log level '{}', using default", level);
    }
    let log_level = config
        .general
        .log_level
        .as_deref()
        .and_then(|level| LevelFilter::from_str(level).ok())
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.general.log_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        host,
        origin,
        local_base_url,
        api_prefix,
        timeout: Duration::from_secs(
            config
                .service
                .timeout_secs
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
        log_level,
        log_file,
    }
}
