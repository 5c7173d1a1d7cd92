//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.orgdesk/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::deep_link::DEFAULT_PREFIXES;
use crate::core::i18n::Language;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OrgdeskConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub links: LinksConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub language: Option<Language>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LinksConfig {
    pub prefixes: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub language: Language,
    pub base_url: String,
    pub timeout: Duration,
    pub link_prefixes: Vec<String>,
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

/// Returns the path to `~/.orgdesk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".orgdesk").join("config.toml"))
}

/// Load config from `~/.orgdesk/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `OrgdeskConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<OrgdeskConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(OrgdeskConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<OrgdeskConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(OrgdeskConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: OrgdeskConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# orgdesk Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# language = "tr"                    # "tr" or "en", or set ORGDESK_LANG

# [api]
# base_url = "http://localhost:8080" # Or set ORGDESK_BASE_URL
# timeout_secs = 30

# [links]
# prefixes = ["orgdesk://", "http://localhost:5173"]
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Values taken from the environment. Split out so resolution stays testable.
#[derive(Debug, Default)]
pub struct EnvOverrides {
    pub base_url: Option<String>,
    pub language: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("ORGDESK_BASE_URL").ok(),
            language: std::env::var("ORGDESK_LANG").ok(),
        }
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &OrgdeskConfig,
    env: &EnvOverrides,
    cli_base_url: Option<&str>,
    cli_language: Option<Language>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| env.base_url.clone())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Language: CLI → env → config → default
    let env_language = env.language.as_deref().and_then(|code| {
        let parsed = Language::from_code(code);
        if parsed.is_none() {
            warn!("Ignoring unknown ORGDESK_LANG value: {}", code);
        }
        parsed
    });
    let language = cli_language
        .or(env_language)
        .or(config.general.language)
        .unwrap_or_default();

    let link_prefixes = config
        .links
        .prefixes
        .clone()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect());

    ResolvedConfig {
        language,
        base_url,
        timeout: Duration::from_secs(config.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        link_prefixes,
    }
}
