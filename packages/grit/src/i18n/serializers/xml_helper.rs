//! XML Helper Module
//!
//! Node types and a visitor that renders them to XML text

/// Visitor trait for XML nodes
pub trait IVisitor {
    fn visit_tag(&mut self, tag: &Tag) -> String;
    fn visit_text(&mut self, text: &Text) -> String;
    fn visit_declaration(&mut self, decl: &Declaration) -> String;
    fn visit_doctype(&mut self, doctype: &Doctype) -> String;
}

struct Visitor;

impl IVisitor for Visitor {
    fn visit_tag(&mut self, tag: &Tag) -> String {
        let str_attrs = self.serialize_attributes(&tag.attrs);

        if tag.children.is_empty() {
            return format!("<{}{}/>", tag.name, str_attrs);
        }

        let str_children: Vec<String> = tag
            .children
            .iter()
            .map(|node| node.visit(self))
            .collect();

        format!(
            "<{}{}>{}</{}>",
            tag.name,
            str_attrs,
            str_children.join(""),
            tag.name
        )
    }

    fn visit_text(&mut self, text: &Text) -> String {
        text.value.clone()
    }

    fn visit_declaration(&mut self, decl: &Declaration) -> String {
        let str_attrs = self.serialize_attributes(&decl.attrs);
        format!("<?xml{}?>", str_attrs)
    }

    fn visit_doctype(&mut self, doctype: &Doctype) -> String {
        format!("<!DOCTYPE {} [\n{}\n]>", doctype.root_tag, doctype.dtd)
    }
}

impl Visitor {
    /// Attributes keep their insertion order
    fn serialize_attributes(&self, attrs: &[(String, String)]) -> String {
        attrs
            .iter()
            .map(|(name, value)| format!(" {}=\"{}\"", name, value))
            .collect()
    }
}

/// Serialize XML nodes to string
pub fn serialize(nodes: &[Box<dyn Node>]) -> String {
    let mut visitor = Visitor;
    nodes
        .iter()
        .map(|node| node.visit(&mut visitor))
        .collect::<Vec<_>>()
        .join("")
}

/// Base trait for all XML nodes
pub trait Node: std::fmt::Debug {
    fn visit(&self, visitor: &mut dyn IVisitor) -> String;
}

/// XML Declaration node
#[derive(Debug, Clone)]
pub struct Declaration {
    pub attrs: Vec<(String, String)>,
}

impl Declaration {
    pub fn new(unescaped_attrs: Vec<(String, String)>) -> Self {
        Declaration {
            attrs: escape_attrs(unescaped_attrs),
        }
    }
}

impl Node for Declaration {
    fn visit(&self, visitor: &mut dyn IVisitor) -> String {
        visitor.visit_declaration(self)
    }
}

/// XML Doctype node
#[derive(Debug, Clone)]
pub struct Doctype {
    pub root_tag: String,
    pub dtd: String,
}

impl Doctype {
    pub fn new(root_tag: String, dtd: String) -> Self {
        Doctype { root_tag, dtd }
    }
}

impl Node for Doctype {
    fn visit(&self, visitor: &mut dyn IVisitor) -> String {
        visitor.visit_doctype(self)
    }
}

/// XML Tag node
#[derive(Debug)]
pub struct Tag {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Box<dyn Node>>,
}

impl Tag {
    pub fn new(
        name: String,
        unescaped_attrs: Vec<(String, String)>,
        children: Vec<Box<dyn Node>>,
    ) -> Self {
        Tag {
            name,
            attrs: escape_attrs(unescaped_attrs),
            children,
        }
    }
}

impl Node for Tag {
    fn visit(&self, visitor: &mut dyn IVisitor) -> String {
        visitor.visit_tag(self)
    }
}

/// XML Text node
#[derive(Debug, Clone)]
pub struct Text {
    pub value: String,
}

impl Text {
    pub fn new(unescaped_value: String) -> Self {
        Text {
            value: escape_text(&unescaped_value),
        }
    }
}

impl Node for Text {
    fn visit(&self, visitor: &mut dyn IVisitor) -> String {
        visitor.visit_text(self)
    }
}

/// XML Carriage Return node (for formatting)
#[derive(Debug, Clone)]
pub struct CR {
    value: String,
}

impl CR {
    pub fn new(ws: usize) -> Self {
        CR {
            value: format!("\n{}", " ".repeat(ws)),
        }
    }
}

impl Node for CR {
    fn visit(&self, visitor: &mut dyn IVisitor) -> String {
        visitor.visit_text(&Text {
            value: self.value.clone(),
        })
    }
}

fn escape_attrs(attrs: Vec<(String, String)>) -> Vec<(String, String)> {
    attrs
        .into_iter()
        .map(|(name, value)| {
            let escaped = escape_attr(&value);
            (name, escaped)
        })
        .collect()
}

/// Escape character data. A raw `\r` would be folded into `\n` by readers.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\r', "&#13;")
}

/// Escape an attribute value. Readers normalize raw tabs and line breaks
/// in attributes to spaces, so they are written as character references.
pub fn escape_attr(text: &str) -> String {
    escape_text(text)
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
        .replace('\n', "&#10;")
        .replace('\t', "&#9;")
}
