//! Unified extraction trait for bulk chat exports.
//!
//! Every export format implements [`Extractor`]: split the raw document into
//! a payload, parse the payload into records, derive a filename stem per
//! record and render a record into a standalone document. The batch driver
//! in [`core::processor`](crate::core::processor) only talks to this trait,
//! so adding a format means adding an implementation, not touching the
//! driver.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "templated")]
//! # fn main() -> chatsplit::Result<()> {
//! use chatsplit::extractor::create_extractor;
//! use chatsplit::format::ExportFormat;
//!
//! let extractor = create_extractor(ExportFormat::Templated);
//! let doc = "var jsonData = [{\"title\":\"Hi\"}];\nvar assetsJson = {};";
//!
//! let export = extractor.split(doc)?;
//! let records = extractor.parse(&export.payload)?;
//! assert_eq!(records.len(), 1);
//! assert_eq!(extractor.stem(&records[0], 1).as_deref(), Some("Hi"));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "templated"))]
//! # fn main() {}
//! ```

use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

use crate::core::template::Template;
use crate::error::{ChatsplitError, Result};
use crate::format::ExportFormat;

/// An export split into its payload and, for templated formats, the
/// surrounding template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitExport {
    /// JSON text holding every record.
    pub payload: String,

    /// Verbatim template text, absent for plain formats.
    pub template: Option<Template>,
}

impl SplitExport {
    /// Creates a split without template fragments.
    pub fn plain(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            template: None,
        }
    }

    /// Creates a split with template fragments.
    pub fn templated(payload: impl Into<String>, template: Template) -> Self {
        Self {
            payload: payload.into(),
            template: Some(template),
        }
    }
}

/// Format-specific extraction steps.
///
/// Implementors must provide:
/// - [`name`](Extractor::name) and [`format`](Extractor::format)
/// - [`split`](Extractor::split) - locate the payload
/// - [`stem`](Extractor::stem) - derive a filename stem, or skip the record
/// - [`render`](Extractor::render) - produce the output document
///
/// [`parse`](Extractor::parse) has a default implementation that reads a
/// JSON array of generic values.
pub trait Extractor: Send + Sync {
    /// Returns the human-readable name of this extractor.
    fn name(&self) -> &'static str;

    /// Returns the export format this extractor handles.
    fn format(&self) -> ExportFormat;

    /// Splits the raw export document into payload and template.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsplitError::PayloadNotFound`] or
    /// [`ChatsplitError::TemplateReconstruction`] when the document does not
    /// have the expected structure.
    fn split(&self, content: &str) -> Result<SplitExport>;

    /// Parses the payload into an ordered sequence of records.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsplitError::MalformedPayload`] if the payload is not a
    /// JSON array.
    fn parse(&self, payload: &str) -> Result<Vec<Value>> {
        parse_records(self.name(), payload)
    }

    /// Derives the filename stem for the record at 1-based `position`.
    ///
    /// Returns `None` when the record should not be written.
    fn stem(&self, record: &Value, position: usize) -> Option<String>;

    /// Renders a single record as a standalone document.
    fn render(&self, record: &Value, export: &SplitExport) -> Result<String>;
}

/// Parses a JSON array payload into generic records.
///
/// Unpaired UTF-16 surrogate escapes are replaced first (see
/// [`repair_lone_surrogates`]), so a single truncated emoji does not make
/// the whole payload unreadable.
pub fn parse_records(format: &'static str, payload: &str) -> Result<Vec<Value>> {
    let repaired = repair_lone_surrogates(payload);
    serde_json::from_str::<Vec<Value>>(&repaired)
        .map_err(|e| ChatsplitError::malformed_payload(format, e, payload))
}

/// Rewrites every `\uXXXX` escape that encodes an unpaired UTF-16 surrogate
/// to `\uFFFD`.
///
/// Such escapes are valid JSON but cannot become a Rust `String`. Properly
/// paired surrogates and escaped backslashes are left alone. Returns the
/// input unchanged when nothing needed repair.
///
/// # Example
///
/// ```rust
/// use chatsplit::extractor::repair_lone_surrogates;
///
/// assert_eq!(repair_lone_surrogates(r#""cut \ud83d""#), r#""cut \uFFFD""#);
/// assert_eq!(repair_lone_surrogates(r#""ok \ud83d\ude00""#), r#""ok \ud83d\ude00""#);
/// ```
pub fn repair_lone_surrogates(payload: &str) -> Cow<'_, str> {
    if !payload.contains("\\u") {
        return Cow::Borrowed(payload);
    }

    let bytes = payload.as_bytes();
    let mut out = String::new();
    let mut flushed = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        let Some(unit) = escaped_unit(bytes, i) else {
            // Any other escape: skip the backslash and the escaped byte.
            i += 2;
            continue;
        };

        let lone = match unit {
            0xD800..=0xDBFF => {
                if escaped_unit(bytes, i + 6).is_some_and(|low| (0xDC00..=0xDFFF).contains(&low)) {
                    i += 12;
                    continue;
                }
                true
            }
            0xDC00..=0xDFFF => true,
            _ => false,
        };

        if lone {
            out.push_str(&payload[flushed..i]);
            out.push_str("\\uFFFD");
            flushed = i + 6;
        }
        i += 6;
    }

    if flushed == 0 {
        return Cow::Borrowed(payload);
    }
    debug!("replaced unpaired surrogate escapes in payload");
    out.push_str(&payload[flushed..]);
    Cow::Owned(out)
}

/// Reads the code unit of a `\uXXXX` escape starting at `at`.
fn escaped_unit(bytes: &[u8], at: usize) -> Option<u16> {
    let escape = bytes.get(at..at + 6)?;
    if escape[0] != b'\\' || escape[1] != b'u' || !escape[2..].iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let hex = std::str::from_utf8(&escape[2..]).ok()?;
    u16::from_str_radix(hex, 16).ok()
}

/// Creates an extractor with default configuration for the given format.
///
/// # Panics
///
/// Panics if the corresponding format feature is not enabled.
pub fn create_extractor(format: ExportFormat) -> Box<dyn Extractor> {
    match format {
        #[cfg(feature = "templated")]
        ExportFormat::Templated => Box::new(crate::extractors::TemplatedExtractor::new()),
        #[cfg(feature = "plain")]
        ExportFormat::Plain => Box::new(crate::extractors::PlainExtractor::new()),
        // Fallback for when features are disabled
        #[allow(unreachable_patterns)]
        _ => panic!(
            "Extractor for {:?} is not enabled. Enable the corresponding feature.",
            format
        ),
    }
}
