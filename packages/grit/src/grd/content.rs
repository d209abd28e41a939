//! Entry content construction
//!
//! Turns the raw text and placeholder parts of a message into content nodes.

use once_cell::sync::Lazy;
use regex::Regex;

use super::tree::{ContentNode, PlaceholderNode};
use crate::chars::is_whitespace;

/// Explicit whitespace delimiter, kept around text that must not be trimmed
pub const WHITESPACE_QUOTE: &str = "'''";

static REFERENCE_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([A-Za-z_][A-Za-z0-9_]*)\]").unwrap());

/// A message part as read from the document, before reference splitting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPart {
    Text(String),
    Placeholder(PlaceholderNode),
}

/// Builds message content: outer whitespace is trimmed, `'''` delimiters
/// are removed, then `[ID]` tokens in text are split into references.
pub fn build_message_content(mut parts: Vec<RawPart>) -> Vec<ContentNode> {
    if let Some(RawPart::Text(first)) = parts.first_mut() {
        let trimmed = first.trim_start_matches(is_whitespace);
        *first = trimmed.strip_prefix(WHITESPACE_QUOTE).unwrap_or(trimmed).to_string();
    }
    if let Some(RawPart::Text(last)) = parts.last_mut() {
        let trimmed = last.trim_end_matches(is_whitespace);
        *last = trimmed.strip_suffix(WHITESPACE_QUOTE).unwrap_or(trimmed).to_string();
    }

    let mut content = Vec::new();
    for part in parts {
        match part {
            RawPart::Text(text) => content.extend(split_references(&text)),
            RawPart::Placeholder(placeholder) => content.push(ContentNode::Placeholder(placeholder)),
        }
    }
    content
}

/// Builds structure content from gathered text, whitespace untouched
pub fn build_structure_content(text: &str) -> Vec<ContentNode> {
    split_references(text)
}

/// Splits `[ID]` tokens out of text; empty text runs are dropped
pub fn split_references(text: &str) -> Vec<ContentNode> {
    let mut nodes = Vec::new();
    let mut last = 0;
    for caps in REFERENCE_REGEXP.captures_iter(text) {
        let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            nodes.push(ContentNode::text(&text[last..whole.start()]));
        }
        nodes.push(ContentNode::reference(id.as_str()));
        last = whole.end();
    }
    if last < text.len() {
        nodes.push(ContentNode::text(&text[last..]));
    }
    nodes
}
