//! Engine configuration.
//!
//! Loaded from TOML; every section is optional.
//!
//! ```toml
//! [bounds]
//! min = 1
//! max = 10
//!
//! [tree]
//! max_depth = 4
//!
//! [display]
//! depth = 2
//! collapse_threshold = 1
//! ```

use std::path::{Path, PathBuf};

use codetree_model::{DepthBounds, DisplaySettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Allowed range for every depth knob.
    pub bounds: DepthBounds,

    /// Tree building.
    pub tree: TreeConfig,

    /// Initial display settings.
    pub display: DisplayConfig,
}

/// Tree building settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Truncate codes to this many segments. Unbounded when absent.
    pub max_depth: Option<usize>,
}

/// Initial display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub depth: u8,
    pub collapse_threshold: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let settings = DisplaySettings::default();
        Self {
            depth: settings.depth,
            collapse_threshold: settings.collapse_threshold,
        }
    }
}

impl EngineConfig {
    /// Load and validate a configuration file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Check that every default sits inside the bounds. The bounds themselves
    /// are checked when they are constructed or parsed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(max_depth) = self.tree.max_depth {
            self.bounds
                .check(max_depth)
                .map_err(|e| ConfigError::Invalid {
                    reason: format!("tree.max_depth: {e}"),
                })?;
        }
        self.display_settings()
            .validate(&self.bounds)
            .map_err(|e| ConfigError::Invalid {
                reason: format!("display: {e}"),
            })
    }

    pub fn display_settings(&self) -> DisplaySettings {
        DisplaySettings {
            depth: self.display.depth,
            collapse_threshold: self.display.collapse_threshold,
        }
    }
}
