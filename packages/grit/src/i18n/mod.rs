//! I18n Module
//!
//! Translation export: limit resolution, entry filtering, placeholder
//! rendering and bundle serialization.

pub mod export;
pub mod filter;
pub mod limit;
pub mod placeholder;
pub mod render;
pub mod serializers;

pub use export::{ExportContext, XmbExporter};
pub use filter::filter_entries;
pub use limit::{resolve, LimitSet, LimitSource};
pub use placeholder::{to_public_name, PlaceholderRegistry};
pub use render::{RenderedEntry, RenderedPlaceholder, Renderer, Segment};
