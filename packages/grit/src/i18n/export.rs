//! XMB export
//!
//! Runs limit resolution, filtering, rendering and serialization over a
//! resource tree and writes the bundle to a sink.

use std::io::Write;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::Result;
use crate::grd::ResourceTree;
use crate::i18n::filter::filter_entries;
use crate::i18n::limit::{resolve, LimitSource};
use crate::i18n::render::{RenderedEntry, Renderer};
use crate::i18n::serializers::{Serializer, Xmb};
use crate::logging::{Logger, NullLogger};

pub const DEFAULT_HANDLER: &str = "grit";
pub const DEFAULT_OUTPUT_LANGUAGE: &str = "en";

/// Per-export settings; never stored on the tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportContext {
    pub handler: String,
    #[serde(alias = "lang")]
    pub output_language: String,
}

impl Default for ExportContext {
    fn default() -> Self {
        ExportContext {
            handler: DEFAULT_HANDLER.to_string(),
            output_language: DEFAULT_OUTPUT_LANGUAGE.to_string(),
        }
    }
}

impl ExportContext {
    pub fn with_output_language(mut self, lang: impl Into<String>) -> Self {
        self.output_language = lang.into();
        self
    }

    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = handler.into();
        self
    }
}

/// Exports a resource tree as an XML message bundle.
///
/// The exporter only reads the tree, so one tree can feed several exports
/// running on different threads.
#[derive(Clone)]
pub struct XmbExporter {
    logger: Arc<dyn Logger>,
}

impl Default for XmbExporter {
    fn default() -> Self {
        XmbExporter::new(Arc::new(NullLogger::new()))
    }
}

impl XmbExporter {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        XmbExporter { logger }
    }

    /// Writes the bundle to `sink` and returns the number of bytes written.
    ///
    /// Nothing reaches the sink unless the whole bundle was built.
    pub fn export<W: Write + ?Sized>(
        &self,
        tree: &ResourceTree,
        context: &ExportContext,
        limit: Option<&LimitSource>,
        sink: &mut W,
    ) -> Result<usize> {
        let bundle = self.bundle(tree, context, limit)?;
        sink.write_all(bundle.as_bytes())?;
        sink.flush()?;
        Ok(bundle.len())
    }

    /// Builds the complete bundle text without writing it anywhere
    pub fn bundle(
        &self,
        tree: &ResourceTree,
        context: &ExportContext,
        limit: Option<&LimitSource>,
    ) -> Result<String> {
        let entries = self.render(tree, limit)?;
        let bundle = Xmb::new().write(&entries, context);

        self.logger.info(&format!(
            "Exported {} messages ({} bytes) for {}",
            entries.len(),
            bundle.len(),
            tree.url()
        ));
        Ok(bundle)
    }

    /// Runs everything up to serialization
    pub fn render(&self, tree: &ResourceTree, limit: Option<&LimitSource>) -> Result<Vec<RenderedEntry>> {
        let logger = self.logger.as_ref();
        let limit_set = resolve(tree, limit, logger)?;

        for structure in tree.structures().filter(|entry| !entry.is_gathered()) {
            logger.debug(&format!("Skipping ungathered structure {}", structure.id));
        }

        let renderer = Renderer::new(tree, logger);
        Ok(filter_entries(tree, limit_set.as_ref())
            .into_iter()
            .map(|entry| renderer.render_entry(entry))
            .collect())
    }
}
