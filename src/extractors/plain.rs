//! Plain JSON export extractor.

use serde_json::Value;

use crate::config::PlainConfig;
use crate::core::sanitize::{SanitizeRules, sanitize_stem};
use crate::error::Result;
use crate::extractor::{Extractor, SplitExport};
use crate::format::ExportFormat;
use crate::message::{Message, record_messages, record_title};

/// Key holding a conversation's name.
pub const NAME_KEY: &str = "name";

/// Key holding a conversation's messages.
pub const MESSAGES_KEY: &str = "chat_messages";

/// Extractor for plain JSON exports (Claude `conversations.json`).
///
/// The export is a JSON array of conversations:
/// ```json
/// [
///   {
///     "uuid": "...",
///     "name": "Conversation title",
///     "chat_messages": [
///       {"sender": "human", "text": "...", "content": [{"type": "text", "text": "..."}]}
///     ]
///   }
/// ]
/// ```
///
/// Conversations without a name are skipped.
pub struct PlainExtractor {
    config: PlainConfig,
}

impl PlainExtractor {
    pub fn new() -> Self {
        Self::with_config(PlainConfig::default())
    }

    pub fn with_config(config: PlainConfig) -> Self {
        Self { config }
    }
}

impl Default for PlainExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PlainExtractor {
    fn name(&self) -> &'static str {
        "Plain JSON"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Plain
    }

    fn split(&self, content: &str) -> Result<SplitExport> {
        Ok(SplitExport::plain(content))
    }

    fn stem(&self, record: &Value, position: usize) -> Option<String> {
        let title = record_title(record, NAME_KEY)?;
        let rules = SanitizeRules::plain().with_max_len(self.config.max_stem_len);
        Some(sanitize_stem(Some(title), position, &rules))
    }

    fn render(&self, record: &Value, _export: &SplitExport) -> Result<String> {
        let title = record_title(record, NAME_KEY).unwrap_or_default();
        Ok(render_document(title, &record_messages(record, MESSAGES_KEY)))
    }
}

/// Builds a minimal HTML document: a title heading followed by one
/// paragraph per message.
///
/// Title and message text are inserted as-is, without HTML escaping.
pub fn render_document(title: &str, messages: &[Message]) -> String {
    let mut html = format!("<html><head><title>{title}</title></head><body><h1>{title}</h1>");
    for msg in messages {
        html.push_str(&format!("<p><b>{}:</b> {}</p>", msg.sender, msg.text));
    }
    html.push_str("</body></html>");
    html
}
