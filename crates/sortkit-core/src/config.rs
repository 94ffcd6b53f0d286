#![forbid(unsafe_code)]

//! Sortable list configuration.
//!
//! Collects the tunables of the reorder engine and the drag layer into one
//! [`SortableConfig`] that can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # sortkit.toml
//! index_policy = "adjusted"
//! default_edge = "after"
//! axis = "vertical"
//! drag_threshold = 3
//! ```
//!
//! ```rust,ignore
//! let config = SortableConfig::from_toml_file("sortkit.toml")?;
//! let config = SortableConfig::from_json_str(json)?;
//! ```
//!
//! Missing fields take their [`Default`] values.

#[cfg(feature = "config")]
use std::path::Path;

use crate::edge::{Axis, Edge};
use crate::error::ConfigError;
use crate::reorder::{IndexPolicy, Reorderer};

/// Largest accepted drag threshold, in cells.
pub const MAX_DRAG_THRESHOLD: u16 = 64;

/// Tunables for a sortable list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SortableConfig {
    /// How destination indices map onto the shortened sequence.
    pub index_policy: IndexPolicy,
    /// Edge used when a drop target reports none.
    pub default_edge: Edge,
    /// Layout direction, used to turn pointer offsets into edges.
    pub axis: Axis,
    /// Manhattan distance (cells) the pointer travels before a press becomes
    /// a drag (default: 3).
    pub drag_threshold: u16,
}

impl Default for SortableConfig {
    fn default() -> Self {
        Self {
            index_policy: IndexPolicy::default(),
            default_edge: Edge::default(),
            axis: Axis::default(),
            drag_threshold: 3,
        }
    }
}

impl SortableConfig {
    /// Reorder engine bound to this config's index policy.
    #[must_use]
    pub const fn reorderer(&self) -> Reorderer {
        Reorderer::new(self.index_policy)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.drag_threshold > MAX_DRAG_THRESHOLD {
            errors.push(format!(
                "drag_threshold must be <= {MAX_DRAG_THRESHOLD}, got {}",
                self.drag_threshold
            ));
        }
        errors
    }

    /// Consume the config, failing with every validation error at once.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Load and validate from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load and validate from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load and validate from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load and validate from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }
}
