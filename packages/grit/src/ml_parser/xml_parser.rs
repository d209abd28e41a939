//! XML Parser
//!
//! Converts XML tokens into an element tree

use super::ast::{Attribute, Comment, Element, Node, Text};
use super::lexer::{tokenize, TokenizeOptions};
use super::tokens::{Token, TokenType};
use crate::parse_util::{ParseError, ParseSourceSpan};

/// Parse tree result
#[derive(Debug, Clone)]
pub struct ParseTreeResult {
    pub root_nodes: Vec<Node>,
    pub errors: Vec<ParseError>,
}

impl ParseTreeResult {
    pub fn new(root_nodes: Vec<Node>, errors: Vec<ParseError>) -> Self {
        ParseTreeResult { root_nodes, errors }
    }

    /// The document element, if the document has one
    pub fn root_element(&self) -> Option<&Element> {
        self.root_nodes.iter().find_map(Node::as_element)
    }
}

/// XML parser
#[derive(Debug, Default)]
pub struct XmlParser;

impl XmlParser {
    pub fn new() -> Self {
        XmlParser
    }

    pub fn parse(&self, source: &str, url: &str, options: Option<TokenizeOptions>) -> ParseTreeResult {
        let tokenize_result = tokenize(source, url, options.unwrap_or_default());
        if !tokenize_result.errors.is_empty() {
            return ParseTreeResult::new(Vec::new(), tokenize_result.errors);
        }

        let mut tree_builder = TreeBuilder::new(tokenize_result.tokens);
        tree_builder.build();
        ParseTreeResult::new(tree_builder.root_nodes, tree_builder.errors)
    }
}

/// Internal tree builder
struct TreeBuilder {
    tokens: Vec<Token>,
    index: usize,
    stack: Vec<Element>,
    root_nodes: Vec<Node>,
    errors: Vec<ParseError>,
    seen_root: bool,
}

impl TreeBuilder {
    fn new(tokens: Vec<Token>) -> Self {
        TreeBuilder {
            tokens,
            index: 0,
            stack: Vec::new(),
            root_nodes: Vec::new(),
            errors: Vec::new(),
            seen_root: false,
        }
    }

    fn build(&mut self) {
        while let Some(token) = self.advance() {
            match token.token_type {
                TokenType::TagOpenStart => self.consume_element_start_tag(token),
                TokenType::TagClose => self.consume_element_end_tag(token),
                TokenType::Text | TokenType::Cdata => self.consume_text(token),
                TokenType::Comment => self.consume_comment(token),
                TokenType::ProcessingInstruction => self.consume_processing_instruction(token),
                TokenType::DocType => self.consume_doc_type(token),
                TokenType::Eof => {
                    self.close_document(&token);
                    break;
                }
                TokenType::AttrName
                | TokenType::AttrValue
                | TokenType::TagOpenEnd
                | TokenType::TagOpenEndVoid => {
                    self.add_error("Unexpected token".to_string(), token.source_span);
                }
            }

            if !self.errors.is_empty() {
                break;
            }
        }
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn advance_if(&mut self, token_type: TokenType) -> Option<Token> {
        match self.tokens.get(self.index) {
            Some(token) if token.token_type == token_type => self.advance(),
            _ => None,
        }
    }

    fn close_document(&mut self, eof: &Token) {
        if let Some(open) = self.stack.last() {
            let msg = format!("Unclosed element \"{}\"", open.name);
            let span = open.source_span.clone();
            self.add_error(msg, span);
        } else if !self.seen_root {
            self.add_error(
                "Document has no root element".to_string(),
                eof.source_span.clone(),
            );
        }
    }

    fn consume_element_start_tag(&mut self, start_tag: Token) {
        let name = start_tag.value().to_string();
        let mut attrs: Vec<Attribute> = Vec::new();

        while let Some(name_token) = self.advance_if(TokenType::AttrName) {
            let Some(value_token) = self.advance_if(TokenType::AttrValue) else {
                self.add_error(
                    format!("Attribute \"{}\" has no value", name_token.value()),
                    name_token.source_span,
                );
                return;
            };
            if attrs.iter().any(|attr| attr.name == name_token.value()) {
                self.add_error(
                    format!("Duplicate attribute \"{}\" on element \"{}\"", name_token.value(), name),
                    name_token.source_span,
                );
                return;
            }
            attrs.push(Attribute {
                name: name_token.value().to_string(),
                value: value_token.value().to_string(),
                source_span: ParseSourceSpan::new(
                    name_token.source_span.start.clone(),
                    value_token.source_span.end.clone(),
                ),
            });
        }

        let is_void = if self.advance_if(TokenType::TagOpenEndVoid).is_some() {
            true
        } else if self.advance_if(TokenType::TagOpenEnd).is_some() {
            false
        } else {
            self.add_error(
                format!("Unterminated start tag \"{}\"", name),
                start_tag.source_span,
            );
            return;
        };

        if self.stack.is_empty() && self.seen_root {
            self.add_error(
                format!("Unexpected element \"{}\" after the root element", name),
                start_tag.source_span,
            );
            return;
        }

        let end = self.tokens[self.index - 1].source_span.end.clone();
        let span = ParseSourceSpan::new(start_tag.source_span.start.clone(), end);
        let mut element = Element::new(name, attrs, span.clone());

        if is_void {
            element.end_source_span = Some(span);
            self.add_to_parent(Node::Element(element));
        } else {
            self.stack.push(element);
        }
    }

    fn consume_element_end_tag(&mut self, end_tag: Token) {
        let name = end_tag.value();
        match self.stack.pop() {
            Some(mut element) if element.name == name => {
                element.source_span.end = end_tag.source_span.end.clone();
                element.end_source_span = Some(end_tag.source_span);
                self.add_to_parent(Node::Element(element));
            }
            Some(element) => {
                let msg = format!(
                    "Unexpected closing tag \"{}\", expected \"{}\"",
                    name, element.name
                );
                self.add_error(msg, end_tag.source_span);
            }
            None => {
                let msg = format!("Unexpected closing tag \"{}\"", name);
                self.add_error(msg, end_tag.source_span);
            }
        }
    }

    fn consume_text(&mut self, token: Token) {
        let value = token.value().to_string();
        if self.stack.is_empty() {
            if !value.trim().is_empty() {
                self.add_error(
                    "Text is not allowed outside the root element".to_string(),
                    token.source_span,
                );
            }
            return;
        }
        self.add_to_parent(Node::Text(Text::new(value, token.source_span)));
    }

    fn consume_comment(&mut self, token: Token) {
        if self.stack.is_empty() {
            return;
        }
        self.add_to_parent(Node::Comment(Comment {
            value: token.value().to_string(),
            source_span: token.source_span,
        }));
    }

    fn consume_processing_instruction(&mut self, token: Token) {
        // The XML declaration is only legal as the very first token
        if token.value().eq_ignore_ascii_case("xml") && self.index != 1 {
            self.add_error(
                "The XML declaration is only allowed at the start of the document".to_string(),
                token.source_span,
            );
        }
    }

    fn consume_doc_type(&mut self, token: Token) {
        if self.seen_root || !self.stack.is_empty() {
            self.add_error(
                "DOCTYPE is only allowed before the root element".to_string(),
                token.source_span,
            );
        }
    }

    fn add_error(&mut self, msg: String, span: ParseSourceSpan) {
        self.errors.push(ParseError::new(span, msg));
    }

    fn add_to_parent(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => Self::add_to_node_list(&mut parent.children, node),
            None => {
                self.seen_root = true;
                self.root_nodes.push(node);
            }
        }
    }

    /// Adjacent text (e.g. text followed by a CDATA section) becomes one node
    fn add_to_node_list(list: &mut Vec<Node>, node: Node) {
        if let Node::Text(text) = &node {
            if let Some(Node::Text(prev)) = list.last_mut() {
                prev.value.push_str(&text.value);
                prev.source_span.end = text.source_span.end.clone();
                return;
            }
        }
        list.push(node);
    }
}
