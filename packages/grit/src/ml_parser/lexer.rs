//! ML Parser Lexer
//!
//! XML tokenizer - converts source text into tokens.
//!
//! The tokenizer stops at the first error: resource documents are strict XML
//! and there is nothing useful to recover once the markup is broken.

use once_cell::sync::Lazy;
use regex::Regex;

use super::tokens::{Token, TokenType};
use crate::chars;
use crate::parse_util::{ParseError, ParseLocation, ParseSourceFile, ParseSourceSpan};

/// Tokenization result
#[derive(Debug, Clone)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

/// Tokenization options
#[derive(Debug, Clone, Default)]
pub struct TokenizeOptions {
    /// Keep `\r\n` and `\r` as they are instead of normalizing them to `\n`
    pub preserve_line_endings: bool,
}

/// Main tokenization function
pub fn tokenize(source: &str, url: &str, options: TokenizeOptions) -> TokenizeResult {
    let content = if options.preserve_line_endings {
        source.to_string()
    } else {
        normalize_line_endings(source)
    };
    let file = ParseSourceFile::new(content, url);
    let mut tokenizer = Tokenizer::new(file);
    tokenizer.tokenize();

    TokenizeResult {
        tokens: tokenizer.tokens,
        errors: tokenizer.errors,
    }
}

static CR_OR_CRLF_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").unwrap());

/// XML end-of-line handling: every `\r\n` and lone `\r` becomes `\n`
pub fn normalize_line_endings(source: &str) -> String {
    CR_OR_CRLF_REGEXP.replace_all(source, "\n").into_owned()
}

/// Character reference types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharacterReferenceType {
    Hex,
    Dec,
}

type LexResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone)]
struct CursorState {
    peek: char,
    offset: usize,
    line: usize,
    column: usize,
}

/// Plain character cursor over the whole file
#[derive(Debug, Clone)]
struct PlainCharacterCursor {
    file: ParseSourceFile,
    state: CursorState,
}

impl PlainCharacterCursor {
    fn new(file: ParseSourceFile) -> Self {
        let mut cursor = PlainCharacterCursor {
            file,
            state: CursorState {
                peek: chars::EOF,
                offset: 0,
                line: 0,
                column: 0,
            },
        };
        cursor.update_peek();
        cursor
    }

    fn update_peek(&mut self) {
        self.state.peek = self.file.content[self.state.offset..]
            .chars()
            .next()
            .unwrap_or(chars::EOF);
    }

    fn peek(&self) -> char {
        self.state.peek
    }

    fn is_eof(&self) -> bool {
        self.state.offset >= self.file.content.len()
    }

    fn advance(&mut self) {
        if self.is_eof() {
            return;
        }
        self.state.offset += self.state.peek.len_utf8();
        if self.state.peek == chars::LF {
            self.state.line += 1;
            self.state.column = 0;
        } else {
            self.state.column += 1;
        }
        self.update_peek();
    }

    fn starts_with(&self, s: &str) -> bool {
        self.file.content[self.state.offset..].starts_with(s)
    }

    fn location(&self) -> ParseLocation {
        ParseLocation::new(
            self.file.clone(),
            self.state.offset,
            self.state.line,
            self.state.column,
        )
    }

    fn get_span(&self, start: &PlainCharacterCursor) -> ParseSourceSpan {
        ParseSourceSpan::new(start.location(), self.location())
    }

    fn get_chars(&self, start: &PlainCharacterCursor) -> String {
        self.file.content[start.state.offset..self.state.offset].to_string()
    }
}

struct Tokenizer {
    cursor: PlainCharacterCursor,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

impl Tokenizer {
    fn new(file: ParseSourceFile) -> Self {
        Tokenizer {
            cursor: PlainCharacterCursor::new(file),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn tokenize(&mut self) {
        while !self.cursor.is_eof() {
            let start = self.cursor.clone();

            let result = if self.attempt_char_code(chars::LT) {
                if self.attempt_char_code(chars::BANG) {
                    if self.attempt_str("[CDATA[") {
                        self.consume_cdata(start)
                    } else if self.attempt_str("--") {
                        self.consume_comment(start)
                    } else if self.attempt_str("DOCTYPE") {
                        self.consume_doc_type(start)
                    } else {
                        Err(self.unexpected_character_error("\"--\", \"[CDATA[\" or \"DOCTYPE\""))
                    }
                } else if self.attempt_char_code(chars::QUESTION) {
                    self.consume_processing_instruction(start)
                } else if self.attempt_char_code(chars::SLASH) {
                    self.consume_tag_close(start)
                } else {
                    self.consume_tag_open(start)
                }
            } else {
                self.consume_text()
            };

            if let Err(error) = result {
                self.errors.push(error);
                break;
            }
        }

        let end = self.cursor.clone();
        self.push_token(TokenType::Eof, vec![], &end);
    }

    fn push_token(&mut self, token_type: TokenType, parts: Vec<String>, start: &PlainCharacterCursor) {
        let source_span = self.cursor.get_span(start);
        self.tokens.push(Token::new(token_type, parts, source_span));
    }

    fn attempt_char_code(&mut self, char_code: char) -> bool {
        if !self.cursor.is_eof() && self.cursor.peek() == char_code {
            self.cursor.advance();
            true
        } else {
            false
        }
    }

    fn require_char_code(&mut self, char_code: char) -> LexResult<()> {
        if self.attempt_char_code(char_code) {
            Ok(())
        } else {
            Err(self.unexpected_character_error(&format!("\"{}\"", char_code)))
        }
    }

    fn attempt_str(&mut self, s: &str) -> bool {
        if !self.cursor.starts_with(s) {
            return false;
        }
        for _ in s.chars() {
            self.cursor.advance();
        }
        true
    }

    /// Skips whitespace, returns whether any was consumed
    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while !self.cursor.is_eof() && chars::is_whitespace(self.cursor.peek()) {
            self.cursor.advance();
            skipped = true;
        }
        skipped
    }

    fn unexpected_character_error(&self, expected: &str) -> ParseError {
        let span = self.cursor.get_span(&self.cursor);
        let found = if self.cursor.is_eof() {
            "EOF".to_string()
        } else {
            self.cursor.peek().to_string()
        };
        ParseError::new(
            span,
            format!("Unexpected character \"{}\", expected {}", found, expected),
        )
    }

    fn consume_name(&mut self) -> LexResult<String> {
        if self.cursor.is_eof() || !chars::is_name_start(self.cursor.peek()) {
            return Err(self.unexpected_character_error("a name"));
        }
        let start = self.cursor.clone();
        while !self.cursor.is_eof() && chars::is_name_char(self.cursor.peek()) {
            self.cursor.advance();
        }
        Ok(self.cursor.get_chars(&start))
    }

    /// Reads up to (not including) `terminator`, then consumes the terminator
    fn consume_until(&mut self, terminator: &str) -> LexResult<String> {
        let start = self.cursor.clone();
        while !self.cursor.starts_with(terminator) {
            if self.cursor.is_eof() {
                return Err(self.unexpected_character_error(&format!("\"{}\"", terminator)));
            }
            self.cursor.advance();
        }
        let content = self.cursor.get_chars(&start);
        self.attempt_str(terminator);
        Ok(content)
    }

    fn consume_text(&mut self) -> LexResult<()> {
        let start = self.cursor.clone();
        let mut text = String::new();

        while !self.cursor.is_eof() && self.cursor.peek() != chars::LT {
            if self.cursor.peek() == chars::AMPERSAND {
                let decoded = self.consume_entity()?;
                text.push_str(&decoded);
            } else {
                text.push(self.cursor.peek());
                self.cursor.advance();
            }
        }

        self.push_token(TokenType::Text, vec![text], &start);
        Ok(())
    }

    /// Decodes one `&...;` reference, the cursor sits on the `&`
    fn consume_entity(&mut self) -> LexResult<String> {
        let start = self.cursor.clone();
        self.cursor.advance();

        if self.attempt_char_code(chars::HASH) {
            let ref_type = if self.attempt_char_code('x') {
                CharacterReferenceType::Hex
            } else {
                CharacterReferenceType::Dec
            };
            let digits_start = self.cursor.clone();
            while !self.cursor.is_eof() && !is_digit_entity_end(ref_type, self.cursor.peek()) {
                self.cursor.advance();
            }
            let digits = self.cursor.get_chars(&digits_start);
            if digits.is_empty() || !self.attempt_char_code(chars::SEMICOLON) {
                let entity_src = self.cursor.get_chars(&start);
                return Err(ParseError::new(
                    self.cursor.get_span(&start),
                    unparsable_entity_error_msg(ref_type, &entity_src),
                ));
            }

            let radix = match ref_type {
                CharacterReferenceType::Hex => 16,
                CharacterReferenceType::Dec => 10,
            };
            return u32::from_str_radix(&digits, radix)
                .ok()
                .and_then(char::from_u32)
                .filter(|ch| chars::is_xml_char(*ch))
                .map(String::from)
                .ok_or_else(|| {
                    ParseError::new(
                        self.cursor.get_span(&start),
                        invalid_character_reference_error_msg(&self.cursor.get_chars(&start)),
                    )
                });
        }

        let name_start = self.cursor.clone();
        while !self.cursor.is_eof() && chars::is_ascii_letter(self.cursor.peek()) {
            self.cursor.advance();
        }
        let name = self.cursor.get_chars(&name_start);
        if name.is_empty() || !self.attempt_char_code(chars::SEMICOLON) {
            return Err(ParseError::new(
                self.cursor.get_span(&start),
                unknown_entity_error_msg(&self.cursor.get_chars(&start)),
            ));
        }

        let decoded = match name.as_str() {
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            "apos" => "'",
            _ => {
                return Err(ParseError::new(
                    self.cursor.get_span(&start),
                    unknown_entity_error_msg(&self.cursor.get_chars(&start)),
                ))
            }
        };
        Ok(decoded.to_string())
    }

    fn consume_cdata(&mut self, start: PlainCharacterCursor) -> LexResult<()> {
        let content = self.consume_until("]]>")?;
        self.push_token(TokenType::Cdata, vec![content], &start);
        Ok(())
    }

    fn consume_comment(&mut self, start: PlainCharacterCursor) -> LexResult<()> {
        let content = self.consume_until("-->")?;
        self.push_token(TokenType::Comment, vec![content], &start);
        Ok(())
    }

    fn consume_processing_instruction(&mut self, start: PlainCharacterCursor) -> LexResult<()> {
        let target = self.consume_name()?;
        self.skip_whitespace();
        let data = self.consume_until("?>")?;
        self.push_token(
            TokenType::ProcessingInstruction,
            vec![target, data.trim_end().to_string()],
            &start,
        );
        Ok(())
    }

    fn consume_doc_type(&mut self, start: PlainCharacterCursor) -> LexResult<()> {
        let content_start = self.cursor.clone();
        let mut depth = 0usize;

        loop {
            if self.cursor.is_eof() {
                return Err(self.unexpected_character_error("\">\""));
            }
            match self.cursor.peek() {
                quote @ (chars::DQ | chars::SQ) => {
                    self.cursor.advance();
                    while !self.cursor.is_eof() && self.cursor.peek() != quote {
                        self.cursor.advance();
                    }
                }
                chars::LBRACKET => depth += 1,
                chars::RBRACKET => depth = depth.saturating_sub(1),
                chars::GT if depth == 0 => break,
                _ => {}
            }
            self.cursor.advance();
        }

        let content = self.cursor.get_chars(&content_start).trim().to_string();
        self.cursor.advance();
        self.push_token(TokenType::DocType, vec![content], &start);
        Ok(())
    }

    fn consume_tag_open(&mut self, start: PlainCharacterCursor) -> LexResult<()> {
        let name = self.consume_name()?;
        self.push_token(TokenType::TagOpenStart, vec![name], &start);

        loop {
            let had_whitespace = self.skip_whitespace();
            let end_start = self.cursor.clone();

            if self.attempt_char_code(chars::GT) {
                self.push_token(TokenType::TagOpenEnd, vec![], &end_start);
                return Ok(());
            }
            if self.attempt_char_code(chars::SLASH) {
                self.require_char_code(chars::GT)?;
                self.push_token(TokenType::TagOpenEndVoid, vec![], &end_start);
                return Ok(());
            }
            if self.cursor.is_eof() {
                return Err(self.unexpected_character_error("\">\""));
            }
            if !had_whitespace {
                return Err(self.unexpected_character_error("whitespace before attribute"));
            }
            self.consume_attribute()?;
        }
    }

    fn consume_attribute(&mut self) -> LexResult<()> {
        let name_start = self.cursor.clone();
        let name = self.consume_name()?;
        self.push_token(TokenType::AttrName, vec![name], &name_start);

        self.skip_whitespace();
        self.require_char_code(chars::EQ)?;
        self.skip_whitespace();

        let quote_char = self.cursor.peek();
        if self.cursor.is_eof() || (quote_char != chars::DQ && quote_char != chars::SQ) {
            return Err(self.unexpected_character_error("a quoted attribute value"));
        }
        self.cursor.advance();

        let value_start = self.cursor.clone();
        let mut value = String::new();
        loop {
            if self.cursor.is_eof() {
                return Err(self.unexpected_character_error(&format!("\"{}\"", quote_char)));
            }
            let ch = self.cursor.peek();
            if ch == quote_char {
                break;
            }
            match ch {
                chars::LT => return Err(self.unexpected_character_error("attribute value text")),
                chars::AMPERSAND => {
                    let decoded = self.consume_entity()?;
                    value.push_str(&decoded);
                }
                // Attribute-value normalization for literal whitespace
                _ if chars::is_whitespace(ch) => {
                    value.push(chars::SPACE);
                    self.cursor.advance();
                }
                _ => {
                    value.push(ch);
                    self.cursor.advance();
                }
            }
        }

        self.push_token(TokenType::AttrValue, vec![value], &value_start);
        self.cursor.advance();
        Ok(())
    }

    fn consume_tag_close(&mut self, start: PlainCharacterCursor) -> LexResult<()> {
        let name = self.consume_name()?;
        self.skip_whitespace();
        self.require_char_code(chars::GT)?;
        self.push_token(TokenType::TagClose, vec![name], &start);
        Ok(())
    }
}

// Helper functions

fn unknown_entity_error_msg(entity_src: &str) -> String {
    format!(
        "Unknown entity \"{}\" - use the \"&#<decimal>;\" or  \"&#x<hex>;\" syntax",
        entity_src
    )
}

fn unparsable_entity_error_msg(ref_type: CharacterReferenceType, entity_str: &str) -> String {
    let type_str = match ref_type {
        CharacterReferenceType::Hex => "hexadecimal",
        CharacterReferenceType::Dec => "decimal",
    };
    format!(
        "Unable to parse entity \"{}\" - {} character reference entities must end with \";\"",
        entity_str, type_str
    )
}

fn invalid_character_reference_error_msg(entity_str: &str) -> String {
    format!(
        "Character reference \"{}\" does not refer to a valid XML character",
        entity_str
    )
}

fn is_digit_entity_end(ref_type: CharacterReferenceType, code: char) -> bool {
    match ref_type {
        CharacterReferenceType::Hex => !chars::is_ascii_hex_digit(code),
        CharacterReferenceType::Dec => !chars::is_digit(code),
    }
}
