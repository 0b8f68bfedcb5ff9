//! Conversation record accessors and the normalized message type.
//!
//! Records stay generic [`serde_json::Value`] trees so that every field the
//! export carries passes through untouched. This module provides the few
//! typed views the pipeline needs: a record's title and its messages.
//!
//! # Examples
//!
//! ```
//! use chatsplit::Message;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "sender": "human",
//!     "content": [{"type": "text", "text": "hi"}]
//! });
//! let msg = Message::from_value(&raw);
//! assert_eq!(msg.sender, "human");
//! assert_eq!(msg.text, "hi");
//! ```

use serde_json::Value;

/// Segment type whose `text` contributes to a message body.
pub const TEXT_SEGMENT: &str = "text";

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Speaker identifier (e.g. `human`, `assistant`).
    pub sender: String,

    /// Flattened text content.
    pub text: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }

    /// Builds a message from a raw export object.
    ///
    /// A missing sender becomes an empty string; non-string senders are
    /// rendered with their JSON representation.
    pub fn from_value(value: &Value) -> Self {
        let sender = match value.get("sender") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        Self {
            sender,
            text: extract_text(value),
        }
    }
}

/// Extracts the text body of a raw message object.
///
/// `content` may be:
/// - a plain string: `"hi"`
/// - an array of typed segments: `[{"type": "text", "text": "hi"}, {"type": "tool_use", ...}]`
///
/// Only `text` segments contribute. When content yields nothing, the flat
/// `text` field is used instead, if present.
pub fn extract_text(message: &Value) -> String {
    let from_content = match message.get("content") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(segments)) => segments
            .iter()
            .filter(|seg| seg.get("type").and_then(Value::as_str) == Some(TEXT_SEGMENT))
            .filter_map(|seg| seg.get("text").and_then(Value::as_str))
            .collect::<String>(),
        _ => String::new(),
    };

    if !from_content.is_empty() {
        return from_content;
    }

    message
        .get("text")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Returns the record's title stored under `key`, if it is a non-empty string.
pub fn record_title<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|title| !title.is_empty())
}

/// Returns the record's messages stored under `key`, in order.
///
/// A missing or non-array field yields no messages.
pub fn record_messages(record: &Value, key: &str) -> Vec<Message> {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(Message::from_value).collect())
        .unwrap_or_default()
}
