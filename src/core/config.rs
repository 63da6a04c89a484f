//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.wellcheck/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WellcheckConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub conversation: ConversationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TimingConfig {
    pub follow_up_delay_ms: Option<u64>,
    pub audio_reply_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConversationConfig {
    pub cancel_stale_follow_ups: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FOLLOW_UP_DELAY_MS: u64 = 1500;
pub const DEFAULT_AUDIO_REPLY_DELAY_MS: u64 = 1000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub follow_up_delay: Duration,
    pub audio_reply_delay: Duration,
    /// When true, a new turn aborts follow-ups scheduled by earlier turns.
    pub cancel_stale_follow_ups: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            follow_up_delay: Duration::from_millis(DEFAULT_FOLLOW_UP_DELAY_MS),
            audio_reply_delay: Duration::from_millis(DEFAULT_AUDIO_REPLY_DELAY_MS),
            cancel_stale_follow_ups: true,
        }
    }
}

/// Values supplied on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub no_cancel_stale_follow_ups: bool,
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

/// Returns the path to `~/.wellcheck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".wellcheck").join("config.toml"))
}

/// Load config from `~/.wellcheck/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WellcheckConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<WellcheckConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(WellcheckConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<WellcheckConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(WellcheckConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WellcheckConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Wellcheck Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [service]
# base_url = "http://127.0.0.1:5000"   # Or WELLCHECK_BASE_URL / --base-url
# timeout_secs = 30                    # Or WELLCHECK_TIMEOUT_SECS

# [timing]
# follow_up_delay_ms = 1500            # Delay before the low-risk follow-up prompt
# audio_reply_delay_ms = 1000          # Delay before the voice-check reply

# [conversation]
# cancel_stale_follow_ups = true       # A new message cancels pending follow-ups
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &WellcheckConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &WellcheckConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("WELLCHECK_BASE_URL"))
        .or_else(|| config.service.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: env → config → default
    let timeout_secs = env("WELLCHECK_TIMEOUT_SECS")
        .and_then(|v| match v.parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(e) => {
                warn!("Ignoring WELLCHECK_TIMEOUT_SECS={:?}: {}", v, e);
                None
            }
        })
        .or(config.service.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let cancel_stale_follow_ups = !cli.no_cancel_stale_follow_ups
        && config.conversation.cancel_stale_follow_ups.unwrap_or(true);

    ResolvedConfig {
        base_url,
        request_timeout: Duration::from_secs(timeout_secs),
        follow_up_delay: Duration::from_millis(
            config
                .timing
                .follow_up_delay_ms
                .unwrap_or(DEFAULT_FOLLOW_UP_DELAY_MS),
        ),
        audio_reply_delay: Duration::from_millis(
            config
                .timing
                .audio_reply_delay_ms
                .unwrap_or(DEFAULT_AUDIO_REPLY_DELAY_MS),
        ),
        cancel_stale_follow_ups,
    }
}
