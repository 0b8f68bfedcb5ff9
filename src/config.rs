//! Configuration types for extractors.
//!
//! Each export format has its own configuration struct:
//!
//! - [`TemplatedConfig`] - marker tokens and name limits for HTML viewer exports
//! - [`PlainConfig`] - name limits for plain JSON exports
//!
//! # Example
//!
//! ```rust
//! use chatsplit::config::TemplatedConfig;
//!
//! let config = TemplatedConfig::new()
//!     .with_payload_marker("var jsonData = ")
//!     .with_max_stem_len(64);
//! assert_eq!(config.max_stem_len, 64);
//! ```

use serde::{Deserialize, Serialize};

/// Default maximum length of a sanitized filename stem, in characters.
pub const DEFAULT_MAX_STEM_LEN: usize = 100;

/// Configuration for templated (HTML viewer) exports.
///
/// The payload is the text assigned to `payload_marker`, ending where the
/// line holding `assets_marker` begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatedConfig {
    /// Token that starts the conversation payload assignment (default: `var jsonData = `)
    pub payload_marker: String,

    /// Token that starts the following assets assignment (default: `var assetsJson = `)
    pub assets_marker: String,

    /// Maximum filename stem length in characters (default: 100)
    pub max_stem_len: usize,
}

impl Default for TemplatedConfig {
    fn default() -> Self {
        Self {
            payload_marker: "var jsonData = ".to_string(),
            assets_marker: "var assetsJson = ".to_string(),
            max_stem_len: DEFAULT_MAX_STEM_LEN,
        }
    }
}

impl TemplatedConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the payload marker token.
    #[must_use]
    pub fn with_payload_marker(mut self, marker: impl Into<String>) -> Self {
        self.payload_marker = marker.into();
        self
    }

    /// Sets the assets marker token.
    #[must_use]
    pub fn with_assets_marker(mut self, marker: impl Into<String>) -> Self {
        self.assets_marker = marker.into();
        self
    }

    /// Sets the maximum filename stem length.
    #[must_use]
    pub fn with_max_stem_len(mut self, len: usize) -> Self {
        self.max_stem_len = len;
        self
    }
}

/// Configuration for plain JSON exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainConfig {
    /// Maximum filename stem length in characters (default: 100)
    pub max_stem_len: usize,
}

impl Default for PlainConfig {
    fn default() -> Self {
        Self {
            max_stem_len: DEFAULT_MAX_STEM_LEN,
        }
    }
}

impl PlainConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum filename stem length.
    #[must_use]
    pub fn with_max_stem_len(mut self, len: usize) -> Self {
        self.max_stem_len = len;
        self
    }
}
