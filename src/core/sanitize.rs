//! Filename stem sanitization.
//!
//! Turns a conversation title into a filesystem-friendly stem by removing a
//! fixed set of characters, replacing spaces with underscores and capping the
//! length. This is plain text sanitization: reserved device names and Unicode
//! normalization are not handled.

use crate::config::DEFAULT_MAX_STEM_LEN;

/// Characters removed from titles of templated exports.
pub const TEMPLATED_FORBIDDEN: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Characters removed from titles of plain exports (adds the comma).
pub const PLAIN_FORBIDDEN: &[char] = &['\\', '/', '*', '?', ':', '"', ',', '<', '>', '|'];

/// Per-format sanitization rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeRules {
    /// Characters stripped from the title.
    pub forbidden: &'static [char],

    /// Prefix used when the title is absent, followed by the 1-based position.
    pub untitled_prefix: &'static str,

    /// Maximum stem length in characters.
    pub max_len: usize,
}

impl SanitizeRules {
    /// Rules for templated exports: untitled records become `Untitled_Chat_<i>`.
    pub const fn templated() -> Self {
        Self {
            forbidden: TEMPLATED_FORBIDDEN,
            untitled_prefix: "Untitled_Chat_",
            max_len: DEFAULT_MAX_STEM_LEN,
        }
    }

    /// Rules for plain exports: untitled records become `chat_<i>`.
    pub const fn plain() -> Self {
        Self {
            forbidden: PLAIN_FORBIDDEN,
            untitled_prefix: "chat_",
            max_len: DEFAULT_MAX_STEM_LEN,
        }
    }

    /// Overrides the maximum stem length.
    #[must_use]
    pub const fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }
}

/// Derives a candidate filename stem from a record title.
///
/// `position` is the record's 1-based index in the export.
///
/// # Example
///
/// ```rust
/// use chatsplit::core::sanitize::{SanitizeRules, sanitize_stem};
///
/// let rules = SanitizeRules::templated();
/// assert_eq!(sanitize_stem(Some("What is 2/3?"), 1, &rules), "What_is_23");
/// assert_eq!(sanitize_stem(None, 4, &rules), "Untitled_Chat_4");
/// assert_eq!(sanitize_stem(Some("???"), 5, &rules), "chat_5");
/// ```
pub fn sanitize_stem(title: Option<&str>, position: usize, rules: &SanitizeRules) -> String {
    let Some(title) = title.filter(|t| !t.is_empty()) else {
        return format!("{}{}", rules.untitled_prefix, position);
    };

    let stem: String = title
        .chars()
        .filter(|c| !rules.forbidden.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .take(rules.max_len)
        .collect();

    if stem.is_empty() {
        format!("chat_{}", position)
    } else {
        stem
    }
}
