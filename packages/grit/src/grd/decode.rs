//! Byte decoding and character validation for input documents

use crate::chars::{is_xml_char, LF};
use crate::error::{GritError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Decodes a UTF-8 document, skipping a leading byte order mark
pub fn decode_utf8(bytes: &[u8], url: &str) -> Result<String> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok(text.to_string()),
        Err(err) => {
            let offset = err.valid_up_to() + (bytes.len() - body.len());
            Err(GritError::MalformedInput {
                url: url.to_string(),
                msg: format!("invalid UTF-8 sequence at byte offset {}", offset),
            })
        }
    }
}

/// Decodes UTF-16; the byte order mark decides endianness, little endian without one
pub fn decode_utf16(bytes: &[u8], url: &str) -> Result<String> {
    let (body, big_endian) = if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        (rest, false)
    } else if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        (rest, true)
    } else {
        (bytes, false)
    };

    if body.len() % 2 != 0 {
        return Err(GritError::MalformedInput {
            url: url.to_string(),
            msg: "UTF-16 input has an odd number of bytes".to_string(),
        });
    }

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();

    String::from_utf16(&units).map_err(|_| GritError::MalformedInput {
        url: url.to_string(),
        msg: "invalid UTF-16 sequence".to_string(),
    })
}

/// Rejects characters outside the XML character range, reporting line and column
pub fn validate_xml_chars(text: &str, url: &str) -> Result<()> {
    let mut line = 1;
    let mut col = 1;
    for ch in text.chars() {
        if !is_xml_char(ch) {
            return Err(GritError::MalformedInput {
                url: url.to_string(),
                msg: format!(
                    "character U+{:04X} is not allowed at line {}, column {}",
                    ch as u32, line, col
                ),
            });
        }
        if ch == LF {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    Ok(())
}
