#![deny(clippy::all)]

/**
 * Grit - resource document reader and XMB exporter
 *
 * Reads `.grd` resource documents and exports their translatable messages
 * and structures as XML message bundles.
 */

// Core modules
pub mod chars;
pub mod error;
pub mod logging;
pub mod parse_util;

// Parser modules
pub mod grd;
pub mod ml_parser;

// Export modules
pub mod i18n;

// Re-exports
pub use error::{GritError, Result};
pub use grd::{parse, parse_file, FileGatherer, Gatherer, ResourceTree, StaticGatherer};
pub use i18n::{ExportContext, LimitSource, XmbExporter};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
