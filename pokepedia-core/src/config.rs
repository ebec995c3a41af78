//! Catalog loader configuration
//!
//! ## Configuration Sources (in precedence order)
//!
//! 1. An explicit path (e.g. the CLI `--config` flag)
//! 2. `.pokepedia/config.yaml` - Project-level config
//! 3. `~/.config/pokepedia/config.yaml` - Global config
//! 4. Built-in defaults
//!
//! Every field is optional in the file. JSON is accepted as well since it is
//! valid YAML.
//!
//! ```yaml
//! base_url: https://pokeapi.co/api/v2
//! limit: 151
//! policy: all_or_nothing   # or: partial
//! listing_retries: 2
//! request_timeout_seconds: 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Default PokeAPI base URL
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Default number of references requested from the listing endpoint
pub const DEFAULT_LIMIT: u32 = 151;

/// Config file name inside the project and global config directories
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Project-level config directory
pub const PROJECT_CONFIG_DIR: &str = ".pokepedia";

/// How detail-fetch failures combine into the load outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Any single detail failure fails the whole load
    #[default]
    AllOrNothing,
    /// Keep the entries that loaded and report the ones that failed
    Partial,
}

/// Settings for [`crate::catalog::CatalogLoader`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// API root; the listing endpoint is `<base_url>/pokemon`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Number of references requested from the listing endpoint
    #[serde(default = "default_limit")]
    pub limit: u32,

    #[serde(default)]
    pub policy: AggregationPolicy,

    /// Extra attempts for the listing fetch after the first failure
    #[serde(default)]
    pub listing_retries: u32,

    /// Pause between listing attempts
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Per-request timeout; unset means requests may take as long as they need
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,

    /// Cap on concurrent detail requests; unset means all at once
    #[serde(default)]
    pub max_concurrent_requests: Option<usize>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            limit: default_limit(),
            policy: AggregationPolicy::default(),
            listing_retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_seconds: None,
            max_concurrent_requests: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl CatalogConfig {
    /// Parse configuration from a YAML (or JSON) string
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml_ng::Error> {
        // An empty file is a valid "all defaults" config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(content)
    }

    /// Load configuration from a specific file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!("Loaded catalog config from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration from the standard locations
    ///
    /// An explicit path must exist. The project and global files are
    /// optional; the first one found wins, otherwise defaults are used.
    pub fn load(explicit: Option<&Path>, project_root: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        let project_path = project_root.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE_NAME);
        let candidates = std::iter::once(project_path).chain(global_config_path());

        for path in candidates {
            if path.is_file() {
                return Self::load_from_path(&path);
            }
        }

        tracing::debug!("No catalog config file found, using defaults");
        Ok(Self::default())
    }

    /// Check that the settings describe a usable loader
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limit == 0 {
            return Err(ConfigError::Invalid("limit must be a positive integer".into()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https:// (got '{}')",
                self.base_url
            )));
        }

        if self.max_concurrent_requests == Some(0) {
            return Err(ConfigError::Invalid(
                "max_concurrent_requests must be at least 1 when set".into(),
            ));
        }

        if self.request_timeout_seconds == Some(0) {
            return Err(ConfigError::Invalid(
                "request_timeout_seconds must be at least 1 when set".into(),
            ));
        }

        Ok(())
    }

    /// Listing endpoint URL for this configuration
    pub fn listing_url(&self) -> String {
        format!("{}/pokemon", self.base_url.trim_end_matches('/'))
    }

    /// Per-request timeout; zero is treated as unset
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Global config file location, if a config directory can be determined
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "pokepedia", "pokepedia")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .or_else(|| dirs::config_dir().map(|d| d.join("pokepedia")))
        .map(|dir| dir.join(CONFIG_FILE_NAME))
}
