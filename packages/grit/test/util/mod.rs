#![allow(dead_code)]

/**
 * Grit Test Utilities
 *
 * Shared fixtures and helpers for the reader and exporter tests
 */
use std::path::Path;

use grit::grd::{self, ResourceTree};
use grit::i18n::{ExportContext, LimitSource, XmbExporter};
use grit::ml_parser::lexer::{tokenize, TokenizeOptions};
use grit::ml_parser::tokens::{Token, TokenType};

/// A document with a reusable fragment, a placeholder message, non-ASCII
/// text and one dialog structure.
pub const GREETING_GRD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
  <grit latest_public_release="2" source_lang_id="en-US" current_release="3" base_dir=".">
    <release seq="3">
      <includes>
        <include type="gif" name="ID_LOGO" file="images/logo.gif" />
      </includes>
      <messages>
        <message name="GOOD" desc="sub" sub_variable="true">
          excellent
        </message>
        <message name="IDS_GREETING" desc="Printed to greet the currently logged in user">
          Hello <ph name="USERNAME">%s<ex>Joi</ex></ph>, are you doing [GOOD] today?
        </message>
        <message name="IDS_BONGOBINGO">
          Yibbee
        </message>
        <message name="IDS_UNICODE">
          Olá, 今日は! 😊
        </message>
      </messages>
      <structures>
        <structure type="dialog" name="IDD_SPACYBOX" encoding="utf-16" file="grit/testdata/klonk.rc" />
      </structures>
    </release>
  </grit>"#;

/// Limit document defining only IDS_GREETING
pub const GREETING_LIMIT_GRD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
  <grit latest_public_release="2" source_lang_id="en-US" current_release="3" base_dir=".">
    <release seq="3">
      <messages>
        <message name="IDS_GREETING" desc="Printed to greet the currently logged in user">
          Hello <ph name="USERNAME">%s<ex>Joi</ex></ph>, how are you doing today?
        </message>
      </messages>
    </release>
  </grit>"#;

pub fn parse_grd(source: &str) -> ResourceTree {
    grd::parse(source.as_bytes(), "test.grd", Path::new("."))
        .unwrap_or_else(|err| panic!("failed to parse test document: {}", err))
}

pub fn greeting_tree() -> ResourceTree {
    parse_grd(GREETING_GRD)
}

/// Exports with the default context and returns the bundle as text
pub fn export_to_string(tree: &ResourceTree, limit: Option<&LimitSource>) -> String {
    let mut out = Vec::new();
    XmbExporter::default()
        .export(tree, &ExportContext::default(), limit, &mut out)
        .unwrap_or_else(|err| panic!("export failed: {}", err));
    String::from_utf8(out).expect("bundle is UTF-8")
}

/// `id` attributes of every `<msg>` in a bundle, in output order
pub fn exported_ids(bundle: &str) -> Vec<String> {
    bundle
        .split("<msg id=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

/// Encodes text as UTF-16LE with a byte order mark
pub fn utf16le_with_bom(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

fn humanize_token_type(token_type: TokenType) -> &'static str {
    match token_type {
        TokenType::TagOpenStart => "TAG_OPEN_START",
        TokenType::AttrName => "ATTR_NAME",
        TokenType::AttrValue => "ATTR_VALUE",
        TokenType::TagOpenEnd => "TAG_OPEN_END",
        TokenType::TagOpenEndVoid => "TAG_OPEN_END_VOID",
        TokenType::TagClose => "TAG_CLOSE",
        TokenType::Text => "TEXT",
        TokenType::Cdata => "CDATA",
        TokenType::Comment => "COMMENT",
        TokenType::ProcessingInstruction => "PROCESSING_INSTRUCTION",
        TokenType::DocType => "DOC_TYPE",
        TokenType::Eof => "EOF",
    }
}

fn humanize_parts(token: &Token) -> Vec<String> {
    let mut parts = vec![humanize_token_type(token.token_type).to_string()];
    parts.extend(token.parts.iter().cloned());
    parts
}

pub fn tokenize_and_humanize_parts(input: &str) -> Vec<Vec<String>> {
    let result = tokenize(input, "test.grd", TokenizeOptions::default());
    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    result.tokens.iter().map(humanize_parts).collect()
}

pub fn tokenize_and_humanize_line_column(input: &str) -> Vec<Vec<String>> {
    let result = tokenize(input, "test.grd", TokenizeOptions::default());
    result
        .tokens
        .iter()
        .map(|token| {
            let start = &token.source_span.start;
            vec![
                humanize_token_type(token.token_type).to_string(),
                format!("{}:{}", start.line, start.col),
            ]
        })
        .collect()
}

pub fn tokenize_and_humanize_errors(input: &str) -> Vec<String> {
    tokenize(input, "test.grd", TokenizeOptions::default())
        .errors
        .iter()
        .map(|error| error.msg.clone())
        .collect()
}

/// Shorthand for building expected token rows
pub fn row(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}
