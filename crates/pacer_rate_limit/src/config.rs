//! Configuration structures for rate-limit profiles.
//!
//! This module provides TOML-based configuration for rate limits. The
//! configuration system supports:
//! - Bundled defaults (include_str! from pacer.toml)
//! - User overrides (./pacer.toml or ~/.config/pacer/pacer.toml)
//! - Automatic merging with user values taking precedence

use crate::{LimitProfile, ScopeLimits};
use config::{Config, File, FileFormat};
use pacer_error::{ConfigError, PacerError, PacerResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Rate limits for one named profile, loadable from TOML.
///
/// This struct implements the [`LimitProfile`] trait. Scopes left out of the
/// configuration are unlimited.
///
/// ```toml
/// [profiles.telegram]
/// name = "Telegram"
///
/// [profiles.telegram.global]
/// max_requests = 30
/// window_ms = 1_000
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Name of the profile (e.g., "Telegram")
    pub name: String,

    /// Global scope limit
    #[serde(default)]
    pub global: Option<ScopeLimits>,

    /// Per-conversation scope limit
    #[serde(default)]
    pub per_conversation: Option<ScopeLimits>,

    /// Per-group scope limit
    #[serde(default)]
    pub per_group: Option<ScopeLimits>,
}

impl LimitProfile for LimitsConfig {
    fn global(&self) -> Option<ScopeLimits> {
        self.global
    }

    fn per_conversation(&self) -> Option<ScopeLimits> {
        self.per_conversation
    }

    fn per_group(&self) -> Option<ScopeLimits> {
        self.per_group
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn default_profile() -> String {
    "telegram".to_string()
}

/// Top-level pacer configuration.
///
/// Loads rate-limit profiles from TOML files with a precedence system:
/// 1. Bundled defaults (include_str! from pacer.toml)
/// 2. User override (./pacer.toml or ~/.config/pacer/pacer.toml)
///
/// # Example
///
/// ```no_run
/// use pacer_rate_limit::PacerConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PacerConfig::load()?;
/// let profile = config.get_profile(None).unwrap();
/// println!("Using limits: {}", profile.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PacerConfig {
    /// Map of profile name to limits
    #[serde(default)]
    pub profiles: HashMap<String, LimitsConfig>,

    /// Name of the profile used when none is requested explicitly
    #[serde(default = "default_profile")]
    pub default_profile: String,
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            profiles: HashMap::new(),
            default_profile: default_profile(),
        }
    }
}

impl PacerConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> PacerResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                PacerError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                PacerError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override
    /// earlier):
    /// 1. Bundled defaults (pacer.toml shipped with the library)
    /// 2. User config in home directory (~/.config/pacer/pacer.toml)
    /// 3. User config in current directory (./pacer.toml)
    ///
    /// User config files are optional and will be silently skipped if not
    /// found.
    #[instrument]
    pub fn load() -> PacerResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../pacer.toml");

        let mut builder = Config::builder()
            // Start with bundled defaults
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/pacer/pacer.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional, highest precedence)
        builder = builder.add_source(File::with_name("pacer").required(false));

        builder
            .build()
            .map_err(|e| {
                PacerError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                PacerError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Get a limits profile by name.
    ///
    /// Uses the configured default profile when `name` is `None`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pacer_rate_limit::PacerConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = PacerConfig::load()?;
    /// let telegram = config.get_profile(Some("telegram")).unwrap();
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self))]
    pub fn get_profile(&self, name: Option<&str>) -> Option<LimitsConfig> {
        let profile = name.unwrap_or(&self.default_profile);

        debug!(profile, "Looking up limits profile");

        self.profiles.get(profile).cloned()
    }
}
