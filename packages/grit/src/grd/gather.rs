//! Structure gatherers
//!
//! A gatherer supplies the text of a structure entry. Structures read from a
//! document start out empty and only join an export once gathered.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::decode::{decode_utf16, decode_utf8, validate_xml_chars};
use super::tree::StructureSource;
use crate::error::{GritError, Result};

pub trait Gatherer: Send + Sync {
    /// Returns the structure's text, or `None` when this gatherer has none
    fn gather(&self, name: &str, source: &StructureSource, base_dir: &Path) -> Result<Option<String>>;
}

/// Reads each structure's file whole, relative to the tree's base directory
#[derive(Debug, Default)]
pub struct FileGatherer;

impl FileGatherer {
    pub fn new() -> Self {
        FileGatherer
    }
}

impl Gatherer for FileGatherer {
    fn gather(&self, name: &str, source: &StructureSource, base_dir: &Path) -> Result<Option<String>> {
        let path = base_dir.join(&source.file);
        let bytes = fs::read(&path).map_err(|err| GritError::Gather {
            name: name.to_string(),
            msg: format!("{}: {}", path.display(), err),
        })?;
        let text = decode_structure_text(name, &bytes, source.encoding.as_deref())?;
        Ok(Some(text))
    }
}

/// Serves structure text from memory, keyed by structure name
#[derive(Debug, Default, Clone)]
pub struct StaticGatherer {
    texts: HashMap<String, String>,
}

impl StaticGatherer {
    pub fn new() -> Self {
        StaticGatherer::default()
    }

    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(name.into(), text.into());
    }
}

impl Gatherer for StaticGatherer {
    fn gather(&self, name: &str, _source: &StructureSource, _base_dir: &Path) -> Result<Option<String>> {
        match self.texts.get(name) {
            Some(text) => {
                validate_xml_chars(text, name)?;
                Ok(Some(text.clone()))
            }
            None => Ok(None),
        }
    }
}

/// Decodes gathered bytes per the structure's declared encoding (UTF-8 by default)
pub fn decode_structure_text(name: &str, bytes: &[u8], encoding: Option<&str>) -> Result<String> {
    let encoding = encoding.unwrap_or("utf-8").to_ascii_lowercase();
    let text = match encoding.as_str() {
        "utf-8" | "utf8" => decode_utf8(bytes, name)?,
        "utf-16" | "utf16" => decode_utf16(bytes, name)?,
        _ => {
            return Err(GritError::UnsupportedEncoding {
                name: name.to_string(),
                encoding,
            })
        }
    };
    validate_xml_chars(&text, name)?;
    Ok(text)
}
