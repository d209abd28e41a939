//! Limit Resolver
//!
//! Computes which entry identifiers an export keeps.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::grd::decode::decode_utf8;
use crate::grd::{grd_reader, ResourceTree};
use crate::logging::{LogLevel, Logger};

pub type LimitSet = HashSet<String>;

/// Where the retained identifiers come from
#[derive(Debug, Clone)]
pub enum LimitSource {
    /// Newline separated identifiers
    IdList { bytes: Vec<u8>, url: String },
    /// A resource document whose message identifiers are retained
    Document {
        bytes: Vec<u8>,
        url: String,
        base_dir: PathBuf,
    },
}

impl LimitSource {
    pub fn id_list(bytes: impl Into<Vec<u8>>) -> Self {
        LimitSource::IdList {
            bytes: bytes.into(),
            url: "<limit>".to_string(),
        }
    }

    pub fn document(bytes: impl Into<Vec<u8>>, base_dir: impl Into<PathBuf>) -> Self {
        LimitSource::Document {
            bytes: bytes.into(),
            url: "<limit>".to_string(),
            base_dir: base_dir.into(),
        }
    }

    /// Reads a limit file; `is_document` selects the resource document grammar
    pub fn from_path(path: &Path, is_document: bool) -> Result<Self> {
        let bytes = fs::read(path)?;
        let url = path.display().to_string();
        Ok(if is_document {
            LimitSource::Document {
                bytes,
                url,
                base_dir: path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
            }
        } else {
            LimitSource::IdList { bytes, url }
        })
    }
}

/// `None` means every entry is kept.
///
/// Identifiers absent from `tree` are not an error; they only get logged.
pub fn resolve(
    tree: &ResourceTree,
    limit: Option<&LimitSource>,
    logger: &dyn Logger,
) -> Result<Option<LimitSet>> {
    let Some(limit) = limit else {
        return Ok(None);
    };

    let ids: LimitSet = match limit {
        LimitSource::IdList { bytes, url } => decode_utf8(bytes, url)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        LimitSource::Document {
            bytes,
            url,
            base_dir,
        } => grd_reader::parse(bytes, url, base_dir)?
            .message_ids()
            .map(str::to_string)
            .collect(),
    };

    logger.debug(&format!("Limiting export to {} identifiers", ids.len()));
    if logger.is_enabled(LogLevel::Debug) {
        let mut unknown: Vec<&str> = ids
            .iter()
            .map(String::as_str)
            .filter(|id| tree.get(id).is_none())
            .collect();
        unknown.sort_unstable();
        for id in unknown {
            logger.debug(&format!("Limit identifier {} matches no entry", id));
        }
    }
    Ok(Some(ids))
}
