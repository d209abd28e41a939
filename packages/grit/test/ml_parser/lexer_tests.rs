/**
 * XML Lexer Tests
 *
 * Token streams, positions and errors for the resource document tokenizer
 */

#[path = "../util/mod.rs"]
mod utils;

#[cfg(test)]
mod xml_lexer_tests {
    use super::utils::*;

    mod line_column_numbers {
        use super::*;

        #[test]
        fn should_work_without_newlines() {
            let result = tokenize_and_humanize_line_column("<t>a</t>");
            assert_eq!(
                result,
                vec![
                    row(&["TAG_OPEN_START", "0:0"]),
                    row(&["TAG_OPEN_END", "0:2"]),
                    row(&["TEXT", "0:3"]),
                    row(&["TAG_CLOSE", "0:4"]),
                    row(&["EOF", "0:8"]),
                ]
            );
        }

        #[test]
        fn should_work_with_one_newline() {
            let result = tokenize_and_humanize_line_column("<t>\na</t>");
            assert_eq!(
                result,
                vec![
                    row(&["TAG_OPEN_START", "0:0"]),
                    row(&["TAG_OPEN_END", "0:2"]),
                    row(&["TEXT", "0:3"]),
                    row(&["TAG_CLOSE", "1:1"]),
                    row(&["EOF", "1:5"]),
                ]
            );
        }

        #[test]
        fn should_count_crlf_as_one_line_break() {
            let result = tokenize_and_humanize_line_column("<t>\r\na</t>");
            assert_eq!(result[3], row(&["TAG_CLOSE", "1:1"]));
        }
    }

    mod tags {
        use super::*;

        #[test]
        fn should_parse_open_and_close_tags_with_attributes() {
            assert_eq!(
                tokenize_and_humanize_parts(r#"<grit base_dir=".">x</grit>"#),
                vec![
                    row(&["TAG_OPEN_START", "grit"]),
                    row(&["ATTR_NAME", "base_dir"]),
                    row(&["ATTR_VALUE", "."]),
                    row(&["TAG_OPEN_END"]),
                    row(&["TEXT", "x"]),
                    row(&["TAG_CLOSE", "grit"]),
                    row(&["EOF"]),
                ]
            );
        }

        #[test]
        fn should_parse_void_tags() {
            assert_eq!(
                tokenize_and_humanize_parts(r#"<include name='ID_LOGO' />"#),
                vec![
                    row(&["TAG_OPEN_START", "include"]),
                    row(&["ATTR_NAME", "name"]),
                    row(&["ATTR_VALUE", "ID_LOGO"]),
                    row(&["TAG_OPEN_END_VOID"]),
                    row(&["EOF"]),
                ]
            );
        }

        #[test]
        fn should_allow_whitespace_around_equals_and_before_close() {
            assert_eq!(
                tokenize_and_humanize_parts("<a b = \"c\" ></a >"),
                vec![
                    row(&["TAG_OPEN_START", "a"]),
                    row(&["ATTR_NAME", "b"]),
                    row(&["ATTR_VALUE", "c"]),
                    row(&["TAG_OPEN_END"]),
                    row(&["TAG_CLOSE", "a"]),
                    row(&["EOF"]),
                ]
            );
        }

        #[test]
        fn should_normalize_literal_whitespace_in_attribute_values() {
            let tokens = tokenize_and_humanize_parts("<a b=\"x&#9;y\tz\"/>");
            assert_eq!(tokens[2], row(&["ATTR_VALUE", "x\ty z"]));
        }

        #[test]
        fn should_require_whitespace_between_attributes() {
            let errors = tokenize_and_humanize_errors(r#"<a b="1"c="2"/>"#);
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("whitespace before attribute"), "{}", errors[0]);
        }

        #[test]
        fn should_require_quoted_attribute_values() {
            let errors = tokenize_and_humanize_errors("<a b=1/>");
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("a quoted attribute value"), "{}", errors[0]);
        }
    }

    mod text_and_entities {
        use super::*;

        #[test]
        fn should_decode_named_and_numeric_references() {
            let tokens = tokenize_and_humanize_parts("<a>&lt;&amp;&#x41;&#66;&quot;&apos;&gt;</a>");
            assert_eq!(tokens[2], row(&["TEXT", "<&AB\"'>"]));
        }

        #[test]
        fn should_decode_astral_references() {
            let tokens = tokenize_and_humanize_parts("<a>&#x1F60A;</a>");
            assert_eq!(tokens[2], row(&["TEXT", "😊"]));
        }

        #[test]
        fn should_normalize_line_endings_in_text() {
            let tokens = tokenize_and_humanize_parts("<t>\r\na\rb</t>");
            assert_eq!(tokens[2], row(&["TEXT", "\na\nb"]));
        }

        #[test]
        fn should_reject_unknown_entities() {
            let errors = tokenize_and_humanize_errors("<a>&nbsp;</a>");
            assert_eq!(errors.len(), 1);
            assert!(errors[0].starts_with("Unknown entity \"&nbsp;\""), "{}", errors[0]);
        }

        #[test]
        fn should_reject_references_outside_the_character_range() {
            for input in ["<a>&#x110000;</a>", "<a>&#0;</a>", "<a>&#xD800;</a>"] {
                let errors = tokenize_and_humanize_errors(input);
                assert_eq!(errors.len(), 1, "{}", input);
                assert!(
                    errors[0].contains("does not refer to a valid XML character"),
                    "{}",
                    errors[0]
                );
            }
        }

        #[test]
        fn should_reject_unterminated_references() {
            let errors = tokenize_and_humanize_errors("<a>&#1</a>");
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("must end with \";\""), "{}", errors[0]);
        }
    }

    mod markup_declarations {
        use super::*;

        #[test]
        fn should_parse_cdata() {
            assert_eq!(
                tokenize_and_humanize_parts("<a><![CDATA[<b>&amp;]]></a>"),
                vec![
                    row(&["TAG_OPEN_START", "a"]),
                    row(&["TAG_OPEN_END"]),
                    row(&["CDATA", "<b>&amp;"]),
                    row(&["TAG_CLOSE", "a"]),
                    row(&["EOF"]),
                ]
            );
        }

        #[test]
        fn should_parse_comments() {
            assert_eq!(
                tokenize_and_humanize_parts("<!-- hi -->"),
                vec![row(&["COMMENT", " hi "]), row(&["EOF"])]
            );
        }

        #[test]
        fn should_report_unterminated_comments() {
            let errors = tokenize_and_humanize_errors("<!-- x");
            assert_eq!(errors, vec!["Unexpected character \"EOF\", expected \"-->\"".to_string()]);
        }

        #[test]
        fn should_parse_the_xml_declaration() {
            assert_eq!(
                tokenize_and_humanize_parts(r#"<?xml version="1.0" encoding="UTF-8"?>"#),
                vec![
                    row(&["PROCESSING_INSTRUCTION", "xml", r#"version="1.0" encoding="UTF-8""#]),
                    row(&["EOF"]),
                ]
            );
        }

        #[test]
        fn should_parse_doctype_with_internal_subset() {
            assert_eq!(
                tokenize_and_humanize_parts("<!DOCTYPE grit [<!ELEMENT grit ANY>]>"),
                vec![
                    row(&["DOC_TYPE", "grit [<!ELEMENT grit ANY>]"]),
                    row(&["EOF"]),
                ]
            );
        }
    }
}
