//! ML Parser AST
//!
//! XML element tree produced by the tree builder

use crate::parse_util::ParseSourceSpan;

/// Node type union
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
}

impl Node {
    pub fn source_span(&self) -> &ParseSourceSpan {
        match self {
            Node::Element(n) => &n.source_span,
            Node::Text(n) => &n.source_span,
            Node::Comment(n) => &n.source_span,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// Text node, character data and CDATA sections are both folded into text
#[derive(Debug, Clone)]
pub struct Text {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

impl Text {
    pub fn new(value: String, source_span: ParseSourceSpan) -> Self {
        Text { value, source_span }
    }
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    /// Attributes in source order
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    pub source_span: ParseSourceSpan,
    pub end_source_span: Option<ParseSourceSpan>,
}

impl Element {
    pub fn new(name: String, attrs: Vec<Attribute>, source_span: ParseSourceSpan) -> Self {
        Element {
            name,
            attrs,
            children: Vec::new(),
            source_span,
            end_source_span: None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of the direct text children
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) => Some(text.value.as_str()),
                _ => None,
            })
            .collect()
    }
}
