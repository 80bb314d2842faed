//! Configuration loading for rined.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag; must exist)
//! 2. `~/.rine/config.toml` (user)
//! 3. `/etc/rine/config.toml` (system)
//! 4. Built-in defaults
//!
//! Secrets are loaded separately with mandatory permission checks:
//! 1. `~/.rine/secrets.toml` (user, must be 0600)
//! 2. `/etc/rine/secrets.toml` (system, must be 0600)
//! 3. `FF_COMMUNITY_KEY` environment variable
//!
//! The request timeout and cache TTL are fixed and not configurable here.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::providers::community::COMMUNITY_API_URL;
use crate::providers::public::DEFAULT_PUBLIC_ENDPOINTS;
use crate::{RineError, Result};

/// Environment variable holding the community API key.
pub const COMMUNITY_KEY_ENV: &str = "FF_COMMUNITY_KEY";

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8000).
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

fn default_address() -> String {
    "0.0.0.0:8000".to_string()
}

/// Provider configurations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub public: PublicSourceConfig,
    #[serde(default)]
    pub community: CommunityConfig,
}

/// Public source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicSourceConfig {
    /// Mirror base URLs, tried in order.
    #[serde(default = "default_public_endpoints")]
    pub endpoints: Vec<String>,
}

impl Default for PublicSourceConfig {
    fn default() -> Self {
        Self {
            endpoints: default_public_endpoints(),
        }
    }
}

fn default_public_endpoints() -> Vec<String> {
    DEFAULT_PUBLIC_ENDPOINTS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Community API configuration. The key itself lives in [`Secrets`].
#[derive(Debug, Clone, Deserialize)]
pub struct CommunityConfig {
    #[serde(default = "default_community_url")]
    pub base_url: String,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            base_url: default_community_url(),
        }
    }
}

fn default_community_url() -> String {
    COMMUNITY_API_URL.to_string()
}

/// Secrets configuration (API keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub community: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path must exist. Without one, the first of
    /// `~/.rine/config.toml` and `/etc/rine/config.toml` that exists is
    /// used, and defaults apply when neither does.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a config file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            RineError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            RineError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(RineError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".rine").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/rine/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}

impl Secrets {
    /// Load secrets from the standard locations with permission checks.
    ///
    /// Resolution order:
    /// 1. `~/.rine/secrets.toml` (if exists, must be 0600)
    /// 2. `/etc/rine/secrets.toml` (if exists, must be 0600)
    ///
    /// Returns empty secrets if no file exists (the key may come from the
    /// environment instead).
    pub fn load() -> Result<Self> {
        // Try user secrets first
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(".rine").join("secrets.toml");
            if user_secrets.exists() {
                return Self::load_from_file(&user_secrets);
            }
        }

        // Try system secrets
        let system_secrets = PathBuf::from("/etc/rine/secrets.toml");
        if system_secrets.exists() {
            return Self::load_from_file(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// Parse a secrets file after checking its permissions.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::check_permissions(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            RineError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            RineError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    /// Check that the secrets file has secure permissions (0600 or 0400).
    #[cfg(unix)]
    fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            RineError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        // Reject if group or other bits are set
        if mode & 0o077 != 0 {
            return Err(RineError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(_path: &Path) -> Result<()> {
        Ok(())
    }

    /// Community API key: secrets file first, then [`COMMUNITY_KEY_ENV`].
    ///
    /// Empty values count as unset at either level.
    pub fn community_key(&self) -> Option<String> {
        self.community_key_with(|var| std::env::var(var).ok())
    }

    fn community_key_with(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        self.community
            .as_ref()
            .map(|s| s.api_key.clone())
            .filter(|k| !k.is_empty())
            .or_else(|| env(COMMUNITY_KEY_ENV).filter(|k| !k.is_empty()))
    }
}
