//! ML Parser Tokens
//!
//! Token kinds produced by the XML tokenizer

use crate::parse_util::ParseSourceSpan;

/// Token types for XML parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TokenType {
    /// `<name`, parts: `[name]`
    TagOpenStart,
    /// parts: `[name]`
    AttrName,
    /// Decoded attribute value, parts: `[value]`
    AttrValue,
    /// `>`
    TagOpenEnd,
    /// `/>`
    TagOpenEndVoid,
    /// `</name>`, parts: `[name]`
    TagClose,
    /// Decoded character data, parts: `[text]`
    Text,
    /// `<![CDATA[...]]>`, parts: `[text]`
    Cdata,
    /// `<!--...-->`, parts: `[comment]`
    Comment,
    /// `<?target data?>`, parts: `[target, data]`
    ProcessingInstruction,
    /// `<!DOCTYPE ...>`, parts: `[content]`
    DocType,
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub parts: Vec<String>,
    pub source_span: ParseSourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, parts: Vec<String>, source_span: ParseSourceSpan) -> Self {
        Token {
            token_type,
            parts,
            source_span,
        }
    }

    /// First part of the token, empty when the token carries none
    pub fn value(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or("")
    }
}
