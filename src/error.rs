//! Unified error types for chatsplit.
//!
//! This module provides a single [`ChatsplitError`] enum that covers every
//! failure the extraction pipeline can report.
//!
//! # Fatal vs. per-record errors
//!
//! - **Fatal** errors ([`InputNotFound`](ChatsplitError::InputNotFound),
//!   [`PayloadNotFound`](ChatsplitError::PayloadNotFound),
//!   [`TemplateReconstruction`](ChatsplitError::TemplateReconstruction),
//!   [`MalformedPayload`](ChatsplitError::MalformedPayload),
//!   [`Io`](ChatsplitError::Io)) abort the whole run before any record is
//!   written.
//! - **Per-record** errors ([`RecordWrite`](ChatsplitError::RecordWrite),
//!   [`Json`](ChatsplitError::Json)) are
//!   collected in the [`SplitReport`](crate::core::processor::SplitReport) and never
//!   abort the batch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Maximum number of payload characters kept in a [`MalformedPayload`](ChatsplitError::MalformedPayload) error.
pub const SNIPPET_LEN: usize = 200;

/// A specialized [`Result`] type for chatsplit operations.
///
/// # Example
///
/// ```rust
/// use chatsplit::error::Result;
///
/// fn count_records() -> Result<usize> {
///     Ok(0)
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatsplitError>;

/// The error type for all chatsplit operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatsplitError {
    /// The input export file does not exist.
    #[error("Input file not found: {}", path.display())]
    InputNotFound {
        /// The path that was checked
        path: PathBuf,
    },

    /// An I/O error occurred while reading the export or preparing the
    /// output directory.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The templated export has no payload assignment.
    #[error("Could not find the payload assignment '{marker}' in the export")]
    PayloadNotFound {
        /// The marker token that was searched for
        marker: String,
    },

    /// The template fragments around the payload could not be located.
    #[error("Could not reconstruct the export template: {missing} not found in document")]
    TemplateReconstruction {
        /// What could not be located
        missing: String,
    },

    /// The payload is not a well-formed JSON array of records.
    #[error("Could not parse {format} payload: {source} (payload starts with: {snippet:?})")]
    MalformedPayload {
        /// The export format being parsed (e.g., "Templated HTML")
        format: &'static str,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// Leading part of the offending payload text
        snippet: String,
    },

    /// JSON serialization error while rendering a record.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a single record's output file failed.
    ///
    /// Never aborts a batch; collected in the run report instead.
    #[error("Failed to write {}: {source}", path.display())]
    RecordWrite {
        /// The resolved output path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The export format name or file extension is not recognized.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What was being identified
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatsplitError {
    /// Creates an input-not-found error.
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        ChatsplitError::InputNotFound { path: path.into() }
    }

    /// Creates a payload-not-found error for the given marker.
    pub fn payload_not_found(marker: impl Into<String>) -> Self {
        ChatsplitError::PayloadNotFound {
            marker: marker.into(),
        }
    }

    /// Creates a template reconstruction error.
    pub fn template_reconstruction(missing: impl Into<String>) -> Self {
        ChatsplitError::TemplateReconstruction {
            missing: missing.into(),
        }
    }

    /// Creates a malformed payload error, keeping a bounded snippet of the text.
    pub fn malformed_payload(format: &'static str, source: serde_json::Error, payload: &str) -> Self {
        ChatsplitError::MalformedPayload {
            format,
            source,
            snippet: payload.chars().take(SNIPPET_LEN).collect(),
        }
    }

    /// Creates a record write error.
    pub fn record_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChatsplitError::RecordWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatsplitError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatsplitError::Io(_))
    }

    /// Returns `true` if the input file was missing.
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, ChatsplitError::InputNotFound { .. })
    }

    /// Returns `true` if the payload is malformed.
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, ChatsplitError::MalformedPayload { .. })
    }

    /// Returns `true` if the templated export's structure was not recognized.
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            ChatsplitError::PayloadNotFound { .. } | ChatsplitError::TemplateReconstruction { .. }
        )
    }

    /// Returns `true` if this error only affects a single record.
    pub fn is_record_error(&self) -> bool {
        matches!(self, ChatsplitError::RecordWrite { .. } | ChatsplitError::Json(_))
    }

    /// Returns `true` if this error aborts the whole run.
    pub fn is_fatal(&self) -> bool {
        !self.is_record_error()
    }
}

// ============================================================================
// Tests
// ============================================================================
