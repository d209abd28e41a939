//! XMB Serializer Module
//!
//! XMB (XML Message Bundle) format serializer

use crate::i18n::export::ExportContext;
use crate::i18n::render::{RenderedEntry, Segment};
use crate::i18n::serializers::serializer::Serializer;
use crate::i18n::serializers::xml_helper as xml;

const MESSAGES_TAG: &str = "messagebundle";
const MESSAGE_TAG: &str = "msg";
const PLACEHOLDER_TAG: &str = "ph";
const EXAMPLE_TAG: &str = "ex";

const DOCTYPE: &str = r#"<!ELEMENT messagebundle (msg)*>
<!ATTLIST messagebundle class CDATA #IMPLIED>
<!ATTLIST messagebundle handler CDATA #IMPLIED>
<!ATTLIST messagebundle lang CDATA #IMPLIED>

<!ELEMENT msg (#PCDATA|ph)*>
<!ATTLIST msg id CDATA #IMPLIED>
<!ATTLIST msg desc CDATA #IMPLIED>
<!ATTLIST msg meaning CDATA #IMPLIED>
<!ATTLIST msg xml:space (default|preserve) "default">

<!ELEMENT ph (#PCDATA|ex)*>
<!ATTLIST ph name CDATA #REQUIRED>

<!ELEMENT ex (#PCDATA)>"#;

/// XMB (XML Message Bundle) serializer
#[derive(Debug, Default)]
pub struct Xmb;

impl Xmb {
    pub fn new() -> Self {
        Xmb
    }
}

impl Serializer for Xmb {
    fn write(&self, entries: &[RenderedEntry], context: &ExportContext) -> String {
        let root_attrs = vec![
            ("handler".to_string(), context.handler.clone()),
            ("lang".to_string(), context.output_language.clone()),
        ];
        let mut root = xml::Tag::new(MESSAGES_TAG.to_string(), root_attrs, Vec::new());

        for entry in entries {
            let mut attrs = vec![("id".to_string(), entry.id.clone())];

            if let Some(desc) = entry.description.as_ref().filter(|d| !d.is_empty()) {
                attrs.push(("desc".to_string(), desc.clone()));
            }

            if let Some(meaning) = entry.meaning.as_ref().filter(|m| !m.is_empty()) {
                attrs.push(("meaning".to_string(), meaning.clone()));
            }

            if entry.has_outer_whitespace() {
                attrs.push(("xml:space".to_string(), "preserve".to_string()));
            }

            let msg_tag = xml::Tag::new(MESSAGE_TAG.to_string(), attrs, serialize_segments(&entry.segments));
            root.children.push(Box::new(xml::CR::new(2)));
            root.children.push(Box::new(msg_tag));
        }
        root.children.push(Box::new(xml::CR::new(0)));

        let decl_attrs = vec![
            ("version".to_string(), "1.0".to_string()),
            ("encoding".to_string(), "UTF-8".to_string()),
        ];

        let nodes: Vec<Box<dyn xml::Node>> = vec![
            Box::new(xml::Declaration::new(decl_attrs)),
            Box::new(xml::CR::new(0)),
            Box::new(xml::Doctype::new(MESSAGES_TAG.to_string(), DOCTYPE.to_string())),
            Box::new(xml::CR::new(0)),
            Box::new(root),
            Box::new(xml::CR::new(0)),
        ];

        xml::serialize(&nodes)
    }
}

/// Text segments become character data, placeholders `<ph><ex/>literal</ph>`
fn serialize_segments(segments: &[Segment]) -> Vec<Box<dyn xml::Node>> {
    segments
        .iter()
        .map(|segment| -> Box<dyn xml::Node> {
            match segment {
                Segment::Text(text) => Box::new(xml::Text::new(text.clone())),
                Segment::Placeholder(ph) => {
                    let example = xml::Tag::new(
                        EXAMPLE_TAG.to_string(),
                        Vec::new(),
                        vec![Box::new(xml::Text::new(ph.example.clone()))],
                    );
                    let mut children: Vec<Box<dyn xml::Node>> = vec![Box::new(example)];
                    if !ph.literal.is_empty() {
                        children.push(Box::new(xml::Text::new(ph.literal.clone())));
                    }
                    Box::new(xml::Tag::new(
                        PLACEHOLDER_TAG.to_string(),
                        vec![("name".to_string(), ph.name.clone())],
                        children,
                    ))
                }
            }
        })
        .collect()
}
