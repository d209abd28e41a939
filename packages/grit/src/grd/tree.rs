//! Resource Tree
//!
//! The parsed resource document: translatable entries keyed by identifier,
//! kept in document order.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};

use super::content::build_structure_content;
use super::gather::Gatherer;
use crate::error::{GritError, Result};
use crate::logging::Logger;

/// A named substitution inside an entry's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderNode {
    pub name: String,
    /// Human readable example shown to translators
    pub example: String,
    /// Machine value substituted at render time
    pub literal: String,
}

/// An inline `[ID]` cross-reference to another entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceNode {
    pub id: String,
}

impl ReferenceNode {
    /// The token as written in the source, e.g. `[GOOD]`
    pub fn token(&self) -> String {
        format!("[{}]", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    Text(String),
    Placeholder(PlaceholderNode),
    Reference(ReferenceNode),
}

impl ContentNode {
    pub fn text(value: impl Into<String>) -> Self {
        ContentNode::Text(value.into())
    }

    pub fn placeholder(
        name: impl Into<String>,
        literal: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        ContentNode::Placeholder(PlaceholderNode {
            name: name.into(),
            example: example.into(),
            literal: literal.into(),
        })
    }

    pub fn reference(id: impl Into<String>) -> Self {
        ContentNode::Reference(ReferenceNode { id: id.into() })
    }
}

/// Where a structure's text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureSource {
    /// Gatherer type, e.g. `txt` or `dialog`
    pub structure_type: String,
    /// Path relative to the tree's base directory
    pub file: String,
    pub encoding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Message {
        translateable: bool,
        sub_variable: bool,
    },
    Structure {
        source: StructureSource,
        gathered: bool,
    },
}

/// A translatable unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub description: Option<String>,
    pub meaning: Option<String>,
    pub content: Vec<ContentNode>,
    pub kind: EntryKind,
    /// Position in the source document, assigned on insertion
    pub order: usize,
}

impl Entry {
    pub fn message(id: impl Into<String>, content: Vec<ContentNode>) -> Self {
        Entry {
            id: id.into(),
            description: None,
            meaning: None,
            content,
            kind: EntryKind::Message {
                translateable: true,
                sub_variable: false,
            },
            order: 0,
        }
    }

    pub fn structure(id: impl Into<String>, source: StructureSource) -> Self {
        Entry {
            id: id.into(),
            description: None,
            meaning: None,
            content: Vec::new(),
            kind: EntryKind::Structure {
                source,
                gathered: false,
            },
            order: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = Some(meaning.into());
        self
    }

    /// Marks a message as a reusable fragment, or as excluded from translation
    pub fn with_message_flags(mut self, translateable: bool, sub_variable: bool) -> Self {
        if let EntryKind::Message { .. } = self.kind {
            self.kind = EntryKind::Message {
                translateable,
                sub_variable,
            };
        }
        self
    }

    pub fn is_message(&self) -> bool {
        matches!(self.kind, EntryKind::Message { .. })
    }

    pub fn is_structure(&self) -> bool {
        matches!(self.kind, EntryKind::Structure { .. })
    }

    pub fn is_gathered(&self) -> bool {
        matches!(self.kind, EntryKind::Structure { gathered: true, .. })
    }

    /// Whether the entry belongs in a translation export
    pub fn is_translatable(&self) -> bool {
        match &self.kind {
            EntryKind::Message { translateable, .. } => *translateable,
            EntryKind::Structure { gathered, .. } => *gathered,
        }
    }
}

/// The parsed resource document
#[derive(Debug, Clone)]
pub struct ResourceTree {
    url: String,
    base_dir: PathBuf,
    source_lang_id: Option<String>,
    entries: IndexMap<String, Entry>,
    includes: IndexSet<String>,
}

impl ResourceTree {
    pub fn new(url: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        ResourceTree {
            url: url.into(),
            base_dir: base_dir.into(),
            source_lang_id: None,
            entries: IndexMap::new(),
            includes: IndexSet::new(),
        }
    }

    pub fn with_source_lang_id(mut self, lang: impl Into<String>) -> Self {
        self.source_lang_id = Some(lang.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn source_lang_id(&self) -> Option<&str> {
        self.source_lang_id.as_deref()
    }

    /// Appends an entry in document order
    pub fn insert(&mut self, mut entry: Entry) -> Result<()> {
        if self.contains(&entry.id) {
            return Err(GritError::DuplicateIdentifier(entry.id));
        }
        entry.order = self.entries.len();
        self.entries.insert(entry.id.clone(), entry);
        Ok(())
    }

    /// Records a non-translatable named resource (e.g. an image include)
    pub fn insert_include(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(GritError::DuplicateIdentifier(name));
        }
        self.includes.insert(name);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id) || self.includes.contains(id)
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in document order
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn messages(&self) -> impl Iterator<Item = &Entry> {
        self.entries().filter(|entry| entry.is_message())
    }

    pub fn structures(&self) -> impl Iterator<Item = &Entry> {
        self.entries().filter(|entry| entry.is_structure())
    }

    pub fn message_ids(&self) -> impl Iterator<Item = &str> {
        self.messages().map(|entry| entry.id.as_str())
    }

    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(String::as_str)
    }

    /// Populates structures with externally gathered text.
    ///
    /// Structures the gatherer has nothing for stay ungathered. The gathered
    /// text is kept byte for byte; only `[ID]` references are split out.
    pub fn run_gatherers(&mut self, gatherer: &dyn Gatherer, logger: &dyn Logger) -> Result<()> {
        for entry in self.entries.values_mut() {
            let EntryKind::Structure { source, gathered } = &mut entry.kind else {
                continue;
            };
            match gatherer.gather(&entry.id, source, &self.base_dir)? {
                Some(text) => {
                    entry.content = build_structure_content(&text);
                    *gathered = true;
                    logger.debug(&format!("Gathered structure {} from {}", entry.id, source.file));
                }
                None => {
                    logger.debug(&format!("No gathered text for structure {}", entry.id));
                }
            }
        }
        Ok(())
    }
}
