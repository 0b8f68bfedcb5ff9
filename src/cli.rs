//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Source`] - Export source selection, including auto-detection
//!
//! # Using Source in Libraries
//!
//! ```rust
//! use chatsplit::cli::Source;
//! use chatsplit::format::ExportFormat;
//! use std::path::Path;
//!
//! let format = Source::Auto.resolve(Some(Path::new("chat.html"))).unwrap();
//! assert_eq!(format, ExportFormat::Templated);
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MAX_STEM_LEN;
use crate::error::{ChatsplitError, Result};
use crate::extractor::Extractor;
use crate::format::ExportFormat;

/// Split a bulk chat export (ChatGPT chat.html or Claude conversations.json)
/// into one file per conversation.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatsplit")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatsplit chatgpt
    chatsplit chatgpt export/chat.html -o chats
    chatsplit claude conversations.json
    chatsplit auto ~/Downloads/chat.html --max-name-len 60")]
pub struct Args {
    /// Export source type
    #[arg(value_enum, default_value_t = Source::Auto)]
    pub source: Source,

    /// Path to the export file [default: chat.html or conversations.json]
    pub input: Option<PathBuf>,

    /// Output directory [default: split_chats or claude_chats]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Maximum length of generated file names, in characters
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_STEM_LEN)]
    pub max_name_len: usize,
}

impl Args {
    /// Resolves the export format, detecting it from the input if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is `auto` and cannot be detected.
    pub fn format(&self) -> Result<ExportFormat> {
        self.source.resolve(self.input.as_deref())
    }

    /// Returns the input path, falling back to the format's conventional name.
    pub fn input_path(&self, format: ExportFormat) -> PathBuf {
        self.input
            .clone()
            .unwrap_or_else(|| PathBuf::from(format.default_input()))
    }

    /// Returns the output directory, falling back to the format's default.
    pub fn output_dir(&self, format: ExportFormat) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format.default_output_dir()))
    }

    /// Builds the extractor for `format` with the CLI's settings applied.
    pub fn extractor(&self, format: ExportFormat) -> Box<dyn Extractor> {
        match format {
            #[cfg(feature = "templated")]
            ExportFormat::Templated => Box::new(crate::extractors::TemplatedExtractor::with_config(
                crate::config::TemplatedConfig::new().with_max_stem_len(self.max_name_len),
            )),
            #[cfg(feature = "plain")]
            ExportFormat::Plain => Box::new(crate::extractors::PlainExtractor::with_config(
                crate::config::PlainConfig::new().with_max_stem_len(self.max_name_len),
            )),
            #[allow(unreachable_patterns)]
            _ => panic!("Export format {:?} is not enabled. Enable the corresponding feature.", format),
        }
    }
}

/// Export source selection.
///
/// - [`Auto`](Source::Auto) - detect from the input file extension
/// - [`Templated`](Source::Templated) - ChatGPT `chat.html`
/// - [`Plain`](Source::Plain) - Claude `conversations.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Detect the format from the input file extension
    #[default]
    Auto,

    /// ChatGPT HTML export (chat.html)
    #[value(aliases = ["chatgpt", "html"])]
    #[serde(alias = "chatgpt", alias = "html")]
    Templated,

    /// Claude JSON export (conversations.json)
    #[value(aliases = ["claude", "json"])]
    #[serde(alias = "claude", alias = "json")]
    Plain,
}

impl Source {
    /// Returns all supported source names (including aliases).
    pub fn all_names() -> &'static [&'static str] {
        &["auto", "templated", "chatgpt", "html", "plain", "claude", "json"]
    }

    /// Resolves this source to a concrete export format.
    ///
    /// `Auto` looks at the extension of `input`. Without an input it picks
    /// the first format whose conventional export file exists in the
    /// working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsplitError::InvalidFormat`] if `Auto` cannot decide.
    pub fn resolve(self, input: Option<&Path>) -> Result<ExportFormat> {
        match self {
            Source::Templated => Ok(ExportFormat::Templated),
            Source::Plain => Ok(ExportFormat::Plain),
            Source::Auto => match input {
                Some(path) => ExportFormat::from_path(path),
                None => ExportFormat::all()
                    .iter()
                    .copied()
                    .find(|f| Path::new(f.default_input()).exists())
                    .ok_or_else(|| {
                        ChatsplitError::invalid_format(
                            "auto",
                            "no input given and neither chat.html nor conversations.json found",
                        )
                    }),
            },
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Auto => write!(f, "Auto"),
            Source::Templated => write!(f, "Templated"),
            Source::Plain => write!(f, "Plain"),
        }
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Source::Auto),
            "templated" | "chatgpt" | "html" => Ok(Source::Templated),
            "plain" | "claude" | "json" => Ok(Source::Plain),
            _ => Err(format!(
                "Unknown source: '{}'. Expected one of: {}",
                s,
                Source::all_names().join(", ")
            )),
        }
    }
}

impl From<ExportFormat> for Source {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Templated => Source::Templated,
            ExportFormat::Plain => Source::Plain,
        }
    }
}
