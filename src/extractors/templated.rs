//! Templated (HTML viewer) export extractor.

use serde_json::Value;

use crate::config::TemplatedConfig;
use crate::core::sanitize::{SanitizeRules, sanitize_stem};
use crate::core::template::split_template;
use crate::error::{ChatsplitError, Result};
use crate::extractor::{Extractor, SplitExport};
use crate::format::ExportFormat;
use crate::message::record_title;

/// Key holding a conversation's title.
pub const TITLE_KEY: &str = "title";

/// Extractor for HTML viewer exports (ChatGPT `chat.html`).
///
/// The page embeds all conversations as
/// ```text
/// var jsonData = [{"title": "...", "mapping": {...}, ...}, ...];
/// var assetsJson = {...};
/// ```
///
/// Each output file is the same page with `jsonData` narrowed to a single
/// conversation, so it opens in the original viewer.
pub struct TemplatedExtractor {
    config: TemplatedConfig,
}

impl TemplatedExtractor {
    pub fn new() -> Self {
        Self::with_config(TemplatedConfig::default())
    }

    pub fn with_config(config: TemplatedConfig) -> Self {
        Self { config }
    }

    fn rules(&self) -> SanitizeRules {
        SanitizeRules::templated().with_max_len(self.config.max_stem_len)
    }
}

impl Default for TemplatedExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for TemplatedExtractor {
    fn name(&self) -> &'static str {
        "Templated HTML"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Templated
    }

    fn split(&self, content: &str) -> Result<SplitExport> {
        let split = split_template(content, &self.config)?;
        Ok(SplitExport::templated(split.payload, split.template))
    }

    fn stem(&self, record: &Value, position: usize) -> Option<String> {
        Some(sanitize_stem(record_title(record, TITLE_KEY), position, &self.rules()))
    }

    fn render(&self, record: &Value, export: &SplitExport) -> Result<String> {
        let template = export.template.as_ref().ok_or_else(|| {
            ChatsplitError::invalid_format(self.name(), "export was split without a template")
        })?;
        // Keep the payload an array so the viewer script reads it unchanged.
        let body = serde_json::to_string_pretty(std::slice::from_ref(record))?;
        Ok(template.wrap(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOC: &str = "<html><script>\nvar jsonData = [{\"title\":\"Hello World\",\"messages\":[]}];\nvar assetsJson = {};\n</script></html>";

    #[test]
    fn test_parser_name() {
        assert_eq!(TemplatedExtractor::new().name(), "Templated HTML");
    }

    #[test]
    fn test_split_and_parse() {
        let extractor = TemplatedExtractor::new();
        let export = extractor.split(DOC).unwrap();
        let records = extractor.parse(&export.payload).unwrap();
        assert_eq!(records, vec![json!({"title": "Hello World", "messages": []})]);
    }

    #[test]
    fn test_stem_uses_title() {
        let extractor = TemplatedExtractor::new();
        let record = json!({"title": "Trip: Paris / Rome"});
        assert_eq!(extractor.stem(&record, 1).as_deref(), Some("Trip_Paris__Rome"));
    }

    #[test]
    fn test_stem_untitled() {
        let extractor = TemplatedExtractor::new();
        assert_eq!(extractor.stem(&json!({}), 7).as_deref(), Some("Untitled_Chat_7"));
        assert_eq!(extractor.stem(&json!({"title": null}), 2).as_deref(), Some("Untitled_Chat_2"));
    }

    #[test]
    fn test_stem_respects_configured_length() {
        let extractor = TemplatedExtractor::with_config(TemplatedConfig::new().with_max_stem_len(4));
        assert_eq!(extractor.stem(&json!({"title": "abcdefg"}), 1).as_deref(), Some("abcd"));
    }

    #[test]
    fn test_render_reembeds_single_record() {
        let extractor = TemplatedExtractor::new();
        let export = extractor.split(DOC).unwrap();
        let record = json!({"title": "Hello World", "messages": []});

        let html = extractor.render(&record, &export).unwrap();
        assert_eq!(
            html,
            "<html><script>\nvar jsonData = [\n  {\n    \"title\": \"Hello World\",\n    \"messages\": []\n  }\n]\nvar assetsJson = {};\n</script></html>"
        );
    }

    #[test]
    fn test_render_preserves_key_order_and_unicode() {
        let extractor = TemplatedExtractor::new();
        let export = extractor.split(DOC).unwrap();
        let records = extractor
            .parse(r#"[{"zeta": 1, "title": "Привет 🎉", "alpha": 2}]"#)
            .unwrap();

        let html = extractor.render(&records[0], &export).unwrap();
        let zeta = html.find("\"zeta\"").unwrap();
        let title = html.find("\"title\"").unwrap();
        let alpha = html.find("\"alpha\"").unwrap();
        assert!(zeta < title && title < alpha);
        assert!(html.contains("Привет 🎉"));
    }

    #[test]
    fn test_render_without_template_fails() {
        let extractor = TemplatedExtractor::new();
        let err = extractor.render(&json!({}), &SplitExport::plain("[]")).unwrap_err();
        assert!(matches!(err, ChatsplitError::InvalidFormat { .. }));
    }
}
