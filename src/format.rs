//! Export format identification.
//!
//! These types carry no CLI dependencies and can be used directly by
//! library callers and by other front-ends.
//!
//! # Example
//!
//! ```rust
//! use chatsplit::format::ExportFormat;
//! use std::str::FromStr;
//!
//! let format = ExportFormat::from_str("chatgpt").unwrap();
//! assert_eq!(format, ExportFormat::Templated);
//!
//! let format = ExportFormat::from_path("conversations.json").unwrap();
//! assert_eq!(format, ExportFormat::Plain);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChatsplitError;

/// Supported bulk export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ExportFormat {
    /// An HTML viewer page with the conversations embedded as a script
    /// variable (ChatGPT `chat.html`).
    #[serde(alias = "chatgpt", alias = "html")]
    Templated,

    /// A JSON document whose top level is an array of conversations
    /// (Claude `conversations.json`).
    #[serde(alias = "claude", alias = "json")]
    Plain,
}

impl ExportFormat {
    /// Returns the conventional name of the export file.
    pub fn default_input(&self) -> &'static str {
        match self {
            ExportFormat::Templated => "chat.html",
            ExportFormat::Plain => "conversations.json",
        }
    }

    /// Returns the default output directory name.
    pub fn default_output_dir(&self) -> &'static str {
        match self {
            ExportFormat::Templated => "split_chats",
            ExportFormat::Plain => "claude_chats",
        }
    }

    /// Returns all format names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["templated", "chatgpt", "html", "plain", "claude", "json"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Templated, ExportFormat::Plain]
    }

    /// Detects the export format from the input file extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatsplit::format::ExportFormat;
    ///
    /// assert_eq!(ExportFormat::from_path("export/chat.HTML").unwrap(), ExportFormat::Templated);
    /// assert!(ExportFormat::from_path("notes.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatsplitError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "html" | "htm" => Ok(ExportFormat::Templated),
            "json" => Ok(ExportFormat::Plain),
            _ => Err(ChatsplitError::invalid_format(
                "export",
                format!(
                    "Cannot detect format from extension '.{}'. Expected one of: html, htm, json",
                    ext
                ),
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Templated => write!(f, "Templated HTML"),
            ExportFormat::Plain => write!(f, "Plain JSON"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "templated" | "chatgpt" | "html" => Ok(ExportFormat::Templated),
            "plain" | "claude" | "json" => Ok(ExportFormat::Plain),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ExportFormat::all_names().join(", ")
            )),
        }
    }
}
