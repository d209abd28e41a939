//! ML (Markup Language) Parser Module
//!
//! Strict XML tokenizer and tree builder for resource documents

pub mod ast;
pub mod lexer;
pub mod tokens;
pub mod xml_parser;

pub use ast::*;
pub use lexer::{normalize_line_endings, tokenize, TokenizeOptions, TokenizeResult};
pub use tokens::{Token, TokenType};
pub use xml_parser::{ParseTreeResult, XmlParser};
