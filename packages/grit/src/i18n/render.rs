//! Placeholder Renderer
//!
//! Resolves an entry's content into text and placeholder segments. `[ID]`
//! references become placeholders whose example is the referenced entry's
//! rendered text.

use crate::grd::{ContentNode, Entry, ResourceTree};
use crate::i18n::placeholder::PlaceholderRegistry;
use crate::logging::Logger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPlaceholder {
    pub name: String,
    pub example: String,
    pub literal: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Placeholder(RenderedPlaceholder),
}

/// An entry ready for serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub id: String,
    pub description: Option<String>,
    pub meaning: Option<String>,
    pub segments: Vec<Segment>,
}

impl RenderedEntry {
    /// Whether the content begins or ends with whitespace
    pub fn has_outer_whitespace(&self) -> bool {
        let starts = matches!(self.segments.first(), Some(Segment::Text(text)) if text.starts_with(char::is_whitespace));
        let ends = matches!(self.segments.last(), Some(Segment::Text(text)) if text.ends_with(char::is_whitespace));
        starts || ends
    }
}

pub struct Renderer<'a> {
    tree: &'a ResourceTree,
    logger: &'a dyn Logger,
}

impl<'a> Renderer<'a> {
    pub fn new(tree: &'a ResourceTree, logger: &'a dyn Logger) -> Self {
        Renderer { tree, logger }
    }

    pub fn render_entry(&self, entry: &Entry) -> RenderedEntry {
        RenderedEntry {
            id: entry.id.clone(),
            description: entry.description.clone(),
            meaning: entry.meaning.clone(),
            segments: self.render(entry),
        }
    }

    /// Renders content left to right with a fresh name registry.
    ///
    /// Reference cycles are not detected.
    pub fn render(&self, entry: &Entry) -> Vec<Segment> {
        let mut registry = PlaceholderRegistry::new();
        let mut segments = Vec::with_capacity(entry.content.len());

        for node in &entry.content {
            match node {
                ContentNode::Text(text) => push_text(&mut segments, text),
                ContentNode::Placeholder(ph) => {
                    segments.push(Segment::Placeholder(RenderedPlaceholder {
                        name: registry.claim_name(&ph.name),
                        example: ph.example.clone(),
                        literal: ph.literal.clone(),
                    }));
                }
                ContentNode::Reference(reference) => match self.tree.get(&reference.id) {
                    Some(target) => {
                        segments.push(Segment::Placeholder(RenderedPlaceholder {
                            name: registry.claim_reference_name(&reference.id),
                            example: self.render_plain_text(target),
                            literal: reference.token(),
                        }));
                    }
                    None => {
                        self.logger.debug(&format!(
                            "Unresolved reference {} in {}, kept as text",
                            reference.token(),
                            entry.id
                        ));
                        push_text(&mut segments, &reference.token());
                    }
                },
            }
        }
        segments
    }

    /// The entry as a translator would read it: placeholders by example
    pub fn render_plain_text(&self, entry: &Entry) -> String {
        self.render(entry)
            .into_iter()
            .map(|segment| match segment {
                Segment::Text(text) => text,
                Segment::Placeholder(ph) if ph.example.is_empty() => ph.literal,
                Segment::Placeholder(ph) => ph.example,
            })
            .collect()
    }
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Text(prev)) = segments.last_mut() {
        prev.push_str(text);
        return;
    }
    segments.push(Segment::Text(text.to_string()));
}
