//! Core splitting logic for chatsplit.
//!
//! This module contains:
//! - [`template`] - Locating the embedded payload and its surrounding template
//! - [`sanitize`] - Turning conversation titles into file-name stems
//! - [`namespace`] - Collision-free output paths
//! - [`processor`] - The batch driver and its report
//!
//! # Quick Start
//!
//! ```rust
//! use chatsplit::core::{OutputNamespace, SanitizeRules, sanitize_stem};
//!
//! let stem = sanitize_stem(Some("Plans: v2"), 1, &SanitizeRules::templated());
//! assert_eq!(stem, "Plans_v2");
//!
//! let mut namespace = OutputNamespace::new("split_chats");
//! let first = namespace.resolve(&stem);
//! let second = namespace.resolve(&stem);
//! assert_ne!(first, second);
//! ```

pub mod namespace;
pub mod processor;
pub mod sanitize;
pub mod template;

pub use namespace::{OUTPUT_EXTENSION, OutputNamespace};
pub use processor::{RecordFailure, SplitReport, run_split, split_export};
#[cfg(feature = "plain")]
pub use processor::split_plain_export;
#[cfg(feature = "templated")]
pub use processor::split_templated_export;
pub use sanitize::{SanitizeRules, sanitize_stem};
pub use template::{Template, TemplateSplit, split_template};
