//! Parse Utilities
//!
//! Source files, locations, spans and parse errors shared by the markup
//! lexer, the tree builder and the resource document reader.

use std::fmt;
use std::sync::Arc;

use crate::chars;

#[derive(Debug, Clone, PartialEq)]
pub struct ParseSourceFile {
    pub content: Arc<str>,
    pub url: Arc<str>,
}

impl ParseSourceFile {
    pub fn new(content: impl Into<Arc<str>>, url: impl Into<Arc<str>>) -> Self {
        ParseSourceFile {
            content: content.into(),
            url: url.into(),
        }
    }
}

/// A position inside a source file. `line` and `col` are 0 based.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseLocation {
    pub file: ParseSourceFile,
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(file: ParseSourceFile, offset: usize, line: usize, col: usize) -> Self {
        ParseLocation {
            file,
            offset,
            line,
            col,
        }
    }

    /// Return the source around the location
    /// Up to `max_chars` on each side, stopping after `max_lines` line breaks
    pub fn get_context(&self, max_chars: usize, max_lines: usize) -> Option<(String, String)> {
        let content = &self.file.content;
        if content.is_empty() {
            return None;
        }
        let offset = self.offset.min(content.len());
        let (before_src, after_src) = content.split_at(offset);

        let mut before: Vec<char> = Vec::new();
        let mut lines = 0;
        for ch in before_src.chars().rev().take(max_chars) {
            if ch == chars::LF {
                lines += 1;
                if lines >= max_lines {
                    break;
                }
            }
            before.push(ch);
        }
        before.reverse();

        let mut after = String::new();
        lines = 0;
        for ch in after_src.chars().take(max_chars) {
            if ch == chars::LF {
                lines += 1;
                if lines >= max_lines {
                    break;
                }
            }
            after.push(ch);
        }

        Some((before.into_iter().collect(), after))
    }
}

impl fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reported 1 based, like every editor
        write!(f, "{}@{}:{}", self.file.url, self.line + 1, self.col + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end }
    }

    /// The source text covered by this span
    pub fn text(&self) -> &str {
        let content = &self.start.file.content;
        let end = self.end.offset.min(content.len());
        let start = self.start.offset.min(end);
        &content[start..end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub span: ParseSourceSpan,
    pub msg: String,
    pub level: ParseErrorLevel,
}

impl ParseError {
    pub fn new(span: ParseSourceSpan, msg: impl Into<String>) -> Self {
        ParseError {
            span,
            msg: msg.into(),
            level: ParseErrorLevel::Error,
        }
    }

    pub fn contextual_message(&self) -> String {
        match self.span.start.get_context(40, 2) {
            Some((before, after)) => {
                let level_str = match self.level {
                    ParseErrorLevel::Warning => "WARNING",
                    ParseErrorLevel::Error => "ERROR",
                };
                format!("{} (\"{}[{} ->]{}\")", self.msg, before, level_str, after)
            }
            None => self.msg.clone(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.contextual_message(), self.span.start)
    }
}
