//! Serializer Module
//!
//! Base trait for bundle serializers

use crate::i18n::export::ExportContext;
use crate::i18n::render::RenderedEntry;

/// Base trait for bundle serializers
pub trait Serializer {
    /// Serialize rendered entries, in the given order, to a document.
    /// - Placeholder names are already unique within each entry
    /// - Text has passed character validation when the tree was read
    fn write(&self, entries: &[RenderedEntry], context: &ExportContext) -> String;
}
