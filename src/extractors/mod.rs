//! Extractors for the supported export formats.
//!
//! - [`TemplatedExtractor`] - HTML viewer exports with an embedded payload
//! - [`PlainExtractor`] - JSON array exports
//!
//! Both implement [`Extractor`](crate::extractor::Extractor).

#[cfg(feature = "plain")]
mod plain;
#[cfg(feature = "templated")]
mod templated;

#[cfg(feature = "plain")]
pub use plain::{MESSAGES_KEY, NAME_KEY, PlainExtractor, render_document};
#[cfg(feature = "templated")]
pub use templated::{TITLE_KEY, TemplatedExtractor};
