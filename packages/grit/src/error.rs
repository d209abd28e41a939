//! Error types for reading resource documents and exporting bundles

use thiserror::Error;

use crate::parse_util::ParseError;

#[derive(Debug, Error)]
pub enum GritError {
    /// The input bytes are not valid text for the document grammar.
    #[error("Malformed input in {url}: {msg}")]
    MalformedInput { url: String, msg: String },

    #[error("Failed to parse {url}:\n{}", format_parse_errors(.errors))]
    Parse { url: String, errors: Vec<ParseError> },

    #[error("Invalid resource document {url}: {msg}")]
    InvalidDocument { url: String, msg: String },

    #[error("Duplicate identifier \"{0}\"")]
    DuplicateIdentifier(String),

    #[error("Unsupported encoding \"{encoding}\" for structure {name}")]
    UnsupportedEncoding { name: String, encoding: String },

    #[error("Failed to gather structure {name}: {msg}")]
    Gather { name: String, msg: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GritError {
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, GritError::MalformedInput { .. })
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, GritError>;
