//! Resource documents
//!
//! Reading `.grd` documents into a resource tree and gathering structure text.

pub mod content;
pub mod decode;
pub mod gather;
pub mod grd_reader;
pub mod tree;

pub use gather::{FileGatherer, Gatherer, StaticGatherer};
pub use grd_reader::{parse, parse_file};
pub use tree::{
    ContentNode, Entry, EntryKind, PlaceholderNode, ReferenceNode, ResourceTree, StructureSource,
};
