#![forbid(unsafe_code)]

//! Error types for SortKit.
//!
//! Reordering itself never fails: unresolvable input is a silent no-op. The
//! types here cover the surfaces that can genuinely go wrong around it,
//! namely parsing edge names, key uniqueness, and loading configuration.

use std::fmt;

// ── Edge parsing ────────────────────────────────────────────────────────

/// An edge name that is not one of `before`/`after`/`top`/`bottom`/`left`/`right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEdgeError {
    input: String,
}

impl ParseEdgeError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// The rejected input, verbatim.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseEdgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown edge name: {:?}", self.input)
    }
}

impl std::error::Error for ParseEdgeError {}

// ── Keys ────────────────────────────────────────────────────────────────

/// Key extraction produced an unusable key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Two items share a key.
    Duplicate {
        /// Debug rendering of the shared key.
        key: String,
        /// Index of the first item carrying the key.
        first: usize,
        /// Index of the later item carrying the same key.
        second: usize,
    },
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate { key, first, second } => {
                write!(f, "duplicate key {key} at indices {first} and {second}")
            }
        }
    }
}

impl std::error::Error for KeyError {}

// ── Configuration ───────────────────────────────────────────────────────

/// Errors from loading or validating a [`SortableConfig`](crate::config::SortableConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Invalid(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(errors) => write!(f, "invalid config: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
