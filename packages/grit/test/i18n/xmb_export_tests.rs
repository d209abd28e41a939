/**
 * XMB Export Tests
 *
 * Bundle output for whole trees: content fidelity, placeholders, whitespace
 * and format metadata
 */

#[path = "../util/mod.rs"]
mod utils;

#[cfg(test)]
mod xmb_export_tests {
    use super::utils::*;
    use grit::grd::{ContentNode, Entry, ResourceTree, StaticGatherer};
    use grit::i18n::{ExportContext, XmbExporter};
    use grit::logging::NullLogger;
    use grit::GritError;
    use std::io::{self, Write};

    fn gathered_greeting_tree() -> ResourceTree {
        let mut tree = greeting_tree();
        tree.run_gatherers(
            &StaticGatherer::new().with("IDD_SPACYBOX", "Spacy Box\n  OK ? "),
            &NullLogger::new(),
        )
        .unwrap();
        tree
    }

    mod normal_output {
        use super::*;

        #[test]
        fn should_contain_every_message() {
            let output = export_to_string(&greeting_tree(), None);
            assert!(output.contains("Joi"));
            assert!(output.contains("Yibbee"));
            assert!(output.contains("Olá, 今日は! 😊"));
        }

        #[test]
        fn should_export_every_translatable_identifier_in_order() {
            let output = export_to_string(&gathered_greeting_tree(), None);
            assert_eq!(
                exported_ids(&output),
                vec!["GOOD", "IDS_GREETING", "IDS_BONGOBINGO", "IDS_UNICODE", "IDD_SPACYBOX"]
            );
        }

        #[test]
        fn should_skip_ungathered_structures() {
            let output = export_to_string(&greeting_tree(), None);
            assert!(!exported_ids(&output).contains(&"IDD_SPACYBOX".to_string()));
        }

        #[test]
        fn should_skip_untranslateable_messages() {
            let mut tree = ResourceTree::new("t.grd", ".");
            tree.insert(Entry::message("IDS_A", vec![ContentNode::text("a")]))
                .unwrap();
            tree.insert(
                Entry::message("IDS_BRAND", vec![ContentNode::text("Grit")])
                    .with_message_flags(false, false),
            )
            .unwrap();
            assert_eq!(exported_ids(&export_to_string(&tree, None)), vec!["IDS_A"]);
        }

        #[test]
        fn should_export_exactly_the_tree_identifiers() {
            for size in [0usize, 1, 7, 40] {
                let mut tree = ResourceTree::new("t.grd", ".");
                let mut expected = Vec::new();
                for i in 0..size {
                    let id = format!("IDS_MESSAGE_{}", i);
                    tree.insert(Entry::message(id.as_str(), vec![ContentNode::text(format!("text {}", i))]))
                        .unwrap();
                    expected.push(id);
                }
                assert_eq!(exported_ids(&export_to_string(&tree, None)), expected);
            }
        }
    }

    mod placeholders {
        use super::*;

        #[test]
        fn should_substitute_references_with_numbered_placeholders() {
            let output = export_to_string(&gathered_greeting_tree(), None);
            assert!(output.contains(r#"<ph name="GOOD_1"><ex>excellent</ex>[GOOD]</ph>"#));
        }

        #[test]
        fn should_emit_authored_placeholders_with_example_and_literal() {
            let output = export_to_string(&greeting_tree(), None);
            assert!(output.contains(
                r#"<msg id="IDS_GREETING" desc="Printed to greet the currently logged in user">Hello <ph name="USERNAME"><ex>Joi</ex>%s</ph>, are you doing <ph name="GOOD_1"><ex>excellent</ex>[GOOD]</ph> today?</msg>"#
            ));
        }

        #[test]
        fn should_number_repeated_references_per_entry() {
            let mut tree = ResourceTree::new("t.grd", ".");
            tree.insert(Entry::message("GOOD", vec![ContentNode::text("fine")]))
                .unwrap();
            for id in ["IDS_A", "IDS_B"] {
                tree.insert(Entry::message(
                    id,
                    vec![
                        ContentNode::reference("GOOD"),
                        ContentNode::text(" and "),
                        ContentNode::reference("GOOD"),
                    ],
                ))
                .unwrap();
            }
            let output = export_to_string(&tree, None);
            assert_eq!(output.matches(r#"<ph name="GOOD_1">"#).count(), 2);
            assert_eq!(output.matches(r#"<ph name="GOOD_2">"#).count(), 2);
            assert!(!output.contains("GOOD_3"));
        }

        #[test]
        fn should_leave_unresolved_references_as_text() {
            let mut tree = ResourceTree::new("t.grd", ".");
            tree.insert(Entry::message(
                "IDS_A",
                vec![ContentNode::text("Go "), ContentNode::reference("NOWHERE"), ContentNode::text("!")],
            ))
            .unwrap();
            let output = export_to_string(&tree, None);
            assert!(output.contains(r#"<msg id="IDS_A">Go [NOWHERE]!</msg>"#));
        }

        #[test]
        fn should_resolve_references_within_references() {
            let mut tree = ResourceTree::new("t.grd", ".");
            tree.insert(Entry::message("NAME", vec![ContentNode::placeholder("USER", "%s", "Joi")]))
                .unwrap();
            tree.insert(Entry::message(
                "GREETING",
                vec![ContentNode::text("Hi "), ContentNode::reference("NAME")],
            ))
            .unwrap();
            tree.insert(Entry::message("IDS_TOP", vec![ContentNode::reference("GREETING")]))
                .unwrap();
            let output = export_to_string(&tree, None);
            assert!(output.contains(
                r#"<msg id="IDS_TOP"><ph name="GREETING_1"><ex>Hi Joi</ex>[GREETING]</ph></msg>"#
            ));
        }
    }

    mod whitespace {
        use super::*;

        #[test]
        fn should_keep_trailing_whitespace_of_structures() {
            let output = export_to_string(&gathered_greeting_tree(), None);
            assert!(output.contains("OK ? </msg>"));
            assert!(output.contains(
                "<msg id=\"IDD_SPACYBOX\" xml:space=\"preserve\">Spacy Box\n  OK ? </msg>"
            ));
        }

        #[test]
        fn should_not_mark_trimmed_messages_as_preserved() {
            let output = export_to_string(&greeting_tree(), None);
            assert!(output.contains("<msg id=\"IDS_BONGOBINGO\">Yibbee</msg>"));
            assert!(!output.contains("xml:space=\"preserve\">Yibbee"));
        }
    }

    mod format {
        use super::*;

        #[test]
        fn should_write_declaration_doctype_and_root() {
            let output = export_to_string(&ResourceTree::new("t.grd", "."), None);
            assert!(output.starts_with(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE messagebundle [\n<!ELEMENT messagebundle (msg)*>"
            ));
            assert!(output.ends_with(
                "]>\n<messagebundle handler=\"grit\" lang=\"en\">\n</messagebundle>\n"
            ));
        }

        #[test]
        fn should_take_metadata_from_the_context() {
            let mut out = Vec::new();
            let context = ExportContext::default()
                .with_output_language("fr")
                .with_handler("tests");
            XmbExporter::default()
                .export(&greeting_tree(), &context, None, &mut out)
                .unwrap();
            let output = String::from_utf8(out).unwrap();
            assert!(output.contains("<messagebundle handler=\"tests\" lang=\"fr\">"));
        }

        #[test]
        fn should_escape_text_and_attributes() {
            let mut tree = ResourceTree::new("t.grd", ".");
            tree.insert(
                Entry::message("IDS_A", vec![ContentNode::text("1 < 2 & \"x\"")])
                    .with_description("Tom's <b>")
                    .with_meaning("a&b"),
            )
            .unwrap();
            let output = export_to_string(&tree, None);
            assert!(output.contains(
                r#"<msg id="IDS_A" desc="Tom&apos;s &lt;b&gt;" meaning="a&amp;b">1 &lt; 2 &amp; "x"</msg>"#
            ));
        }

        #[test]
        fn should_return_the_number_of_bytes_written() {
            let mut out = Vec::new();
            let written = XmbExporter::default()
                .export(&greeting_tree(), &ExportContext::default(), None, &mut out)
                .unwrap();
            assert_eq!(written, out.len());
        }
    }

    mod sinks {
        use super::*;

        struct BrokenSink;

        impl Write for BrokenSink {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        #[test]
        fn should_propagate_sink_failures() {
            let err = XmbExporter::default()
                .export(&greeting_tree(), &ExportContext::default(), None, &mut BrokenSink)
                .unwrap_err();
            assert!(matches!(err, GritError::Io(ref io) if io.kind() == io::ErrorKind::BrokenPipe));
        }

        #[test]
        fn should_export_one_tree_from_many_threads() {
            use rayon::prelude::*;

            let tree = gathered_greeting_tree();
            let exporter = XmbExporter::default();
            let langs = ["en", "fr", "de", "ja", "pt-BR", "es"];

            let outputs: Vec<String> = langs
                .par_iter()
                .map(|lang| {
                    let mut out = Vec::new();
                    let context = ExportContext::default().with_output_language(*lang);
                    exporter.export(&tree, &context, None, &mut out).unwrap();
                    String::from_utf8(out).unwrap()
                })
                .collect();

            let baseline = &outputs[0];
            for (lang, output) in langs.iter().zip(&outputs) {
                assert_eq!(
                    output.replace(&format!("lang=\"{}\"", lang), "lang=\"en\""),
                    *baseline
                );
            }
        }
    }
}
