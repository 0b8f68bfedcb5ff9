//! Payload extraction for templated exports.
//!
//! A templated export is an HTML viewer page that embeds every conversation
//! as a script assignment:
//!
//! ```text
//! <html> ... <script>
//! var jsonData = [{"title": "..."}, ...];
//! var assetsJson = {...};
//! ... </script></html>
//! ```
//!
//! The page is never parsed as markup. [`split_template`] finds the payload
//! with a two-state line scanner and locates the surrounding template by
//! literal substring search, so the text before and after the payload can
//! be reused verbatim for every output document.

use tracing::debug;

use crate::config::TemplatedConfig;
use crate::error::{ChatsplitError, Result};

/// Verbatim template text surrounding the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Document text before the payload.
    pub prefix: String,

    /// Document text from the assets marker onward.
    pub suffix: String,
}

impl Template {
    /// Wraps `body` in the template: `prefix + body + "\n" + suffix`.
    pub fn wrap(&self, body: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + body.len() + 1 + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(body);
        out.push('\n');
        out.push_str(&self.suffix);
        out
    }
}

/// A templated export split into payload text and template fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSplit {
    /// JSON text of the payload, trimmed and without the trailing `;`.
    pub payload: String,

    /// Text surrounding the payload.
    pub template: Template,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeMarker,
    Accumulating,
}

/// Splits a templated export into payload and template.
///
/// # Errors
///
/// - [`ChatsplitError::PayloadNotFound`] if no line contains the payload marker.
/// - [`ChatsplitError::TemplateReconstruction`] if the payload start or the
///   assets marker cannot be found in the document.
///
/// # Example
///
/// ```rust
/// use chatsplit::config::TemplatedConfig;
/// use chatsplit::core::template::split_template;
///
/// let doc = "<script>\nvar jsonData = [{\"title\":\"Hi\"}];\nvar assetsJson = {};\n</script>";
/// let split = split_template(doc, &TemplatedConfig::default())?;
/// assert_eq!(split.payload, r#"[{"title":"Hi"}]"#);
/// assert_eq!(split.template.prefix, "<script>\nvar jsonData = ");
/// assert_eq!(split.template.suffix, "var assetsJson = {};\n</script>");
/// # Ok::<(), chatsplit::ChatsplitError>(())
/// ```
pub fn split_template(content: &str, config: &TemplatedConfig) -> Result<TemplateSplit> {
    let payload_marker = config.payload_marker.as_str();
    let assets_marker = config.assets_marker.as_str();

    let mut lines: Vec<String> = Vec::new();
    let mut first_line: Option<&str> = None;
    let mut state = ScanState::BeforeMarker;

    for line in content.split_inclusive('\n') {
        match state {
            ScanState::BeforeMarker => {
                if let Some((_, rest)) = line.split_once(payload_marker) {
                    first_line = Some(rest);
                    lines.push(rest.to_string());
                    state = ScanState::Accumulating;
                }
            }
            ScanState::Accumulating => {
                if line.contains(assets_marker) {
                    if let Some(last) = lines.last_mut() {
                        *last = strip_payload_end(last).to_string();
                    }
                    break;
                }
                lines.push(line.to_string());
            }
        }
    }

    let Some(first_line) = first_line else {
        return Err(ChatsplitError::payload_not_found(payload_marker));
    };
    debug!(lines = lines.len(), "payload lines accumulated");

    let template = locate_template(content, first_line, assets_marker, payload_marker)?;

    let joined = lines.concat();
    let trimmed = joined.trim();
    let payload = trimmed.strip_suffix(';').unwrap_or(trimmed).to_string();

    Ok(TemplateSplit { payload, template })
}

/// Trims the final payload line and drops one `,` then one `;`.
fn strip_payload_end(line: &str) -> &str {
    let line = line.trim();
    let line = line.strip_suffix(',').unwrap_or(line);
    line.strip_suffix(';').unwrap_or(line)
}

fn locate_template(
    content: &str,
    first_line: &str,
    assets_marker: &str,
    payload_marker: &str,
) -> Result<Template> {
    let start = content.find(first_line).ok_or_else(|| {
        ChatsplitError::template_reconstruction(format!("start of payload after '{}'", payload_marker))
    })?;
    let end = content.find(assets_marker).ok_or_else(|| {
        ChatsplitError::template_reconstruction(format!("assets marker '{}'", assets_marker))
    })?;
    if end < start {
        return Err(ChatsplitError::template_reconstruction(format!(
            "assets marker '{}' after the payload",
            assets_marker
        )));
    }

    Ok(Template {
        prefix: content[..start].to_string(),
        suffix: content[end..].to_string(),
    })
}
