/// Stylizer configuration
///
/// Layered with the `config` crate: serde defaults, then an optional TOML
/// file, then `STYLIZER_*` environment variables. Command-line flags are
/// applied on top by the binary.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use stylizer_analysis::{DEFAULT_SIMILARITY_CAP, DEFAULT_STYLE_AMOUNT, MAX_STYLE_AMOUNT};
use thiserror::Error;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "stylizer.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "STYLIZER";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Raw, unvalidated settings as loaded from every source
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StylizerConfig {
    #[serde(default = "default_similarity_cap")]
    pub similarity_cap: f32,

    #[serde(default = "default_style_amount")]
    pub style_amount: f32,

    #[serde(default)]
    pub offline: bool,
}

/// Values given on the command line, which win over every other source
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub similarity_cap: Option<f32>,
    pub style_amount: Option<f32>,
    pub offline: bool,
}

/// Validated settings the pipeline runs with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StylizerSettings {
    /// Refusal threshold, in `(0, 1]`
    pub similarity_cap: f32,
    /// Style amount, already clamped to `[0, MAX_STYLE_AMOUNT]`
    pub style_amount: f32,
    pub offline: bool,
}

impl Default for StylizerConfig {
    fn default() -> Self {
        Self {
            similarity_cap: default_similarity_cap(),
            style_amount: default_style_amount(),
            offline: false,
        }
    }
}

impl StylizerConfig {
    /// Load configuration from file and the process environment
    ///
    /// An explicit `file` must exist; otherwise `stylizer.toml` is read if
    /// present in the working directory.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(file, None)
    }

    /// Load configuration with an explicit environment map instead of the
    /// process environment
    pub fn load_from(
        file: Option<&Path>,
        environment: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut settings = config::Config::builder();

        settings = match file {
            Some(path) => settings.add_source(config::File::from(path.to_path_buf())),
            None => settings.add_source(
                config::File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
            ),
        };

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(environment),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Apply command-line overrides
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(cap) = overrides.similarity_cap {
            self.similarity_cap = cap;
        }
        if let Some(amount) = overrides.style_amount {
            self.style_amount = amount;
        }
        self.offline |= overrides.offline;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<StylizerSettings, ConfigError> {
        let cap = self.similarity_cap;
        if !cap.is_finite() || cap <= 0.0 || cap > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "similarity cap must be in (0, 1], got {}",
                cap
            )));
        }

        let amount = self.style_amount;
        if !amount.is_finite() || amount < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "style amount must be a finite value >= 0, got {}",
                amount
            )));
        }

        let style_amount = if amount > MAX_STYLE_AMOUNT {
            tracing::warn!(
                "Style amount {} exceeds {}; clamping",
                amount,
                MAX_STYLE_AMOUNT
            );
            MAX_STYLE_AMOUNT
        } else {
            amount
        };

        Ok(StylizerSettings {
            similarity_cap: cap,
            style_amount,
            offline: self.offline,
        })
    }
}

// Default values
fn default_similarity_cap() -> f32 {
    DEFAULT_SIMILARITY_CAP
}

fn default_style_amount() -> f32 {
    DEFAULT_STYLE_AMOUNT
}
