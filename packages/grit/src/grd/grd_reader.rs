//! GRD Reader
//!
//! Reads a resource document into a [`ResourceTree`].

use std::fs;
use std::path::Path;

use super::content::{build_message_content, RawPart};
use super::decode::{decode_utf8, validate_xml_chars};
use super::tree::{Entry, PlaceholderNode, ResourceTree, StructureSource};
use crate::error::{GritError, Result};
use crate::ml_parser::{Element, Node, XmlParser};

const GRIT_TAG: &str = "grit";
const RELEASE_TAG: &str = "release";
const MESSAGES_TAG: &str = "messages";
const MESSAGE_TAG: &str = "message";
const STRUCTURES_TAG: &str = "structures";
const STRUCTURE_TAG: &str = "structure";
const INCLUDES_TAG: &str = "includes";
const INCLUDE_TAG: &str = "include";
const PLACEHOLDER_TAG: &str = "ph";
const EXAMPLE_TAG: &str = "ex";
const CONDITIONAL_TAGS: &[&str] = &["if", "then", "else"];

/// Parses a resource document from bytes.
///
/// `base_dir` is the directory the document lives in; the root's `base_dir`
/// attribute is resolved against it.
pub fn parse(bytes: &[u8], url: &str, base_dir: &Path) -> Result<ResourceTree> {
    let text = decode_utf8(bytes, url)?;
    validate_xml_chars(&text, url)?;

    let result = XmlParser::new().parse(&text, url, None);
    if !result.errors.is_empty() {
        return Err(GritError::Parse {
            url: url.to_string(),
            errors: result.errors,
        });
    }

    let reader = GrdReader { url };
    let root = result
        .root_element()
        .ok_or_else(|| reader.invalid("document has no root element".to_string()))?;
    reader.read_root(root, base_dir)
}

/// Reads and parses a document from disk, relative to its own directory
pub fn parse_file(path: &Path) -> Result<ResourceTree> {
    let bytes = fs::read(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse(&bytes, &path.display().to_string(), base_dir)
}

struct GrdReader<'a> {
    url: &'a str,
}

impl<'a> GrdReader<'a> {
    fn invalid(&self, msg: String) -> GritError {
        GritError::InvalidDocument {
            url: self.url.to_string(),
            msg,
        }
    }

    fn invalid_at(&self, element: &Element, msg: String) -> GritError {
        self.invalid(format!("{}: {}", element.source_span.start, msg))
    }

    fn required_attr<'e>(&self, element: &'e Element, name: &str) -> Result<&'e str> {
        element.attr(name).ok_or_else(|| {
            self.invalid_at(
                element,
                format!("<{}> is missing the \"{}\" attribute", element.name, name),
            )
        })
    }

    fn read_root(&self, root: &Element, base_dir: &Path) -> Result<ResourceTree> {
        if root.name != GRIT_TAG {
            return Err(self.invalid_at(
                root,
                format!("expected <{}> root element, found <{}>", GRIT_TAG, root.name),
            ));
        }

        let base_dir = match root.attr("base_dir") {
            Some(relative) => base_dir.join(relative),
            None => base_dir.to_path_buf(),
        };
        let mut tree = ResourceTree::new(self.url, base_dir);
        if let Some(lang) = root.attr("source_lang_id") {
            tree = tree.with_source_lang_id(lang);
        }

        for release in root.child_elements().filter(|el| el.name == RELEASE_TAG) {
            self.read_release(release, &mut tree)?;
        }
        Ok(tree)
    }

    fn read_release(&self, release: &Element, tree: &mut ResourceTree) -> Result<()> {
        for section in release.child_elements() {
            match section.name.as_str() {
                MESSAGES_TAG => {
                    for item in section_items(section, MESSAGE_TAG) {
                        tree.insert(self.read_message(item)?)?;
                    }
                }
                STRUCTURES_TAG => {
                    for item in section_items(section, STRUCTURE_TAG) {
                        tree.insert(self.read_structure(item)?)?;
                    }
                }
                INCLUDES_TAG => {
                    for item in section_items(section, INCLUDE_TAG) {
                        tree.insert_include(self.required_attr(item, "name")?)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn read_message(&self, element: &Element) -> Result<Entry> {
        let name = self.required_attr(element, "name")?;

        let mut parts = Vec::new();
        for child in &element.children {
            match child {
                // Text on both sides of a comment is one run
                Node::Text(text) => match parts.last_mut() {
                    Some(RawPart::Text(prev)) => prev.push_str(&text.value),
                    _ => parts.push(RawPart::Text(text.value.clone())),
                },
                Node::Element(ph) if ph.name == PLACEHOLDER_TAG => {
                    parts.push(RawPart::Placeholder(self.read_placeholder(ph, name)?));
                }
                Node::Element(other) => {
                    return Err(self.invalid_at(
                        other,
                        format!("unexpected <{}> in message {}", other.name, name),
                    ));
                }
                Node::Comment(_) => {}
            }
        }

        let mut entry = Entry::message(name, build_message_content(parts)).with_message_flags(
            element.attr("translateable") != Some("false"),
            element.attr("sub_variable") == Some("true"),
        );
        entry.description = element.attr("desc").map(str::to_string);
        entry.meaning = element.attr("meaning").map(str::to_string);
        Ok(entry)
    }

    fn read_placeholder(&self, element: &Element, message: &str) -> Result<PlaceholderNode> {
        let name = self.required_attr(element, "name")?;
        if !is_placeholder_name(name) {
            return Err(self.invalid_at(
                element,
                format!(
                    "invalid placeholder name \"{}\" in message {}, only A-Z, 0-9 and _ are allowed",
                    name, message
                ),
            ));
        }

        let mut literal = String::new();
        let mut example = None;
        for child in &element.children {
            match child {
                Node::Text(text) => literal.push_str(&text.value),
                Node::Element(ex) if ex.name == EXAMPLE_TAG && example.is_none() => {
                    example = Some(ex.text_content());
                }
                Node::Element(other) => {
                    return Err(self.invalid_at(
                        other,
                        format!("unexpected <{}> in placeholder {}", other.name, name),
                    ));
                }
                Node::Comment(_) => {}
            }
        }

        Ok(PlaceholderNode {
            name: name.to_string(),
            example: example.unwrap_or_else(|| literal.clone()),
            literal,
        })
    }

    fn read_structure(&self, element: &Element) -> Result<Entry> {
        let name = self.required_attr(element, "name")?;
        let source = StructureSource {
            structure_type: self.required_attr(element, "type")?.to_string(),
            file: self.required_attr(element, "file")?.to_string(),
            encoding: element.attr("encoding").map(str::to_string),
        };
        let mut entry = Entry::structure(name, source);
        entry.description = element.attr("desc").map(str::to_string);
        entry.meaning = element.attr("meaning").map(str::to_string);
        Ok(entry)
    }
}

/// Items of a section, descending through `<if>`/`<then>`/`<else>` wrappers
fn section_items<'e>(section: &'e Element, item_tag: &str) -> Vec<&'e Element> {
    let mut items = Vec::new();
    for child in section.child_elements() {
        if child.name == item_tag {
            items.push(child);
        } else if CONDITIONAL_TAGS.contains(&child.name.as_str()) {
            items.extend(section_items(child, item_tag));
        }
    }
    items
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_')
}
