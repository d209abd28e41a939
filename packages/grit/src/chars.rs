/*
 * Character Codes
 *
 * Character constants and classifiers shared by the markup lexer and the
 * message content builder.
 */

// Special characters
pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const LF: char = '\n';
pub const CR: char = '\r';
pub const SPACE: char = ' ';

// Punctuation
pub const BANG: char = '!';
pub const DQ: char = '"';
pub const HASH: char = '#';
pub const AMPERSAND: char = '&';
pub const SQ: char = '\'';
pub const MINUS: char = '-';
pub const SLASH: char = '/';
pub const COLON: char = ':';
pub const SEMICOLON: char = ';';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';
pub const QUESTION: char = '?';

// Brackets
pub const LBRACKET: char = '[';
pub const RBRACKET: char = ']';
pub const UNDERSCORE: char = '_';

/// Check if character is XML whitespace (S production)
pub fn is_whitespace(ch: char) -> bool {
    ch == SPACE || ch == TAB || ch == LF || ch == CR
}

/// Check if character is a digit
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Check if character is ASCII letter
pub fn is_ascii_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Check if character is ASCII hex digit
pub fn is_ascii_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

/// Check if the character is allowed anywhere in an XML 1.0 document.
///
/// `Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]`
pub fn is_xml_char(ch: char) -> bool {
    matches!(ch as u32,
        0x9 | 0xA | 0xD
        | 0x20..=0xD7FF
        | 0xE000..=0xFFFD
        | 0x10000..=0x10FFFF)
}

/// Check if character can start an element or attribute name
pub fn is_name_start(ch: char) -> bool {
    is_ascii_letter(ch) || ch == UNDERSCORE || ch == COLON || (ch as u32) >= 0xC0
}

/// Check if character can continue an element or attribute name
pub fn is_name_char(ch: char) -> bool {
    is_name_start(ch) || is_digit(ch) || ch == MINUS || ch == '.'
}
