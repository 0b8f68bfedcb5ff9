//! # Chatsplit
//!
//! A Rust library for splitting bulk chat exports into one file per
//! conversation.
//!
//! ## Overview
//!
//! Chat services let users download their whole history as a single file.
//! Chatsplit breaks such a file up:
//! - **Templated HTML** - ChatGPT `chat.html`, an offline viewer page that
//!   embeds every conversation in a script variable. Each output file is the
//!   same page narrowed to one conversation, so it still opens in the viewer.
//! - **Plain JSON** - Claude `conversations.json`, a JSON array of
//!   conversations. Each output file is a minimal HTML transcript.
//!
//! Output names are derived from conversation titles, stripped of characters
//! that are unsafe in file names, and never overwrite an existing file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatsplit::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let extractor = create_extractor(ExportFormat::Templated);
//!     let report = split_export(
//!         extractor.as_ref(),
//!         Path::new("chat.html"),
//!         Path::new("split_chats"),
//!         None,
//!     )?;
//!
//!     for failure in &report.failures {
//!         eprintln!("#{}: {}", failure.position, failure.error);
//!     }
//!     println!("{} of {} written", report.written.len(), report.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`extractor`] - The [`Extractor`](extractor::Extractor) trait and
//!   [`create_extractor`](extractor::create_extractor)
//! - [`extractors`] - Format implementations
//! - [`format`] - [`ExportFormat`](format::ExportFormat)
//! - [`config`] - Extractor configuration types
//! - [`core`] - Template splitting, sanitizing, output naming and the batch driver
//! - [`message`] - Message and title extraction from raw records
//! - [`progress`] - Progress events and console narration
//! - [`error`] - Unified error types ([`ChatsplitError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod extractor;
pub mod extractors;
pub mod format;
pub mod message;
pub mod progress;

// Re-export the main types at the crate root for convenience
pub use error::{ChatsplitError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatsplit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;

    pub use crate::error::{ChatsplitError, Result};

    pub use crate::extractor::{Extractor, SplitExport, create_extractor};
    pub use crate::format::ExportFormat;

    pub use crate::config::{PlainConfig, TemplatedConfig};

    pub use crate::core::processor::{RecordFailure, SplitReport, run_split, split_export};

    pub use crate::progress::{ProgressCallback, SplitEvent, console_narrator};

    #[cfg(feature = "plain")]
    pub use crate::extractors::PlainExtractor;
    #[cfg(feature = "templated")]
    pub use crate::extractors::TemplatedExtractor;
}
