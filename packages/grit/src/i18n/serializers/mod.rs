//! I18n Serializers
//!
//! Bundle output formats

pub mod serializer;
pub mod xmb;
pub mod xml_helper;

pub use serializer::Serializer;
pub use xmb::Xmb;
