//! Legacy codepage encoding for stored documents.
//!
//! Downstream consumers read the stored objects as cp932 (Windows-31J).
//! `encoding_rs` exposes that codepage under its WHATWG name, Shift_JIS.

use crate::util::error::IngestError;
use encoding_rs::SHIFT_JIS;

/// Encode `text` as cp932.
///
/// # Errors
/// Returns [`IngestError::Encoding`] if any character has no cp932
/// representation. The encoder would otherwise substitute an HTML numeric
/// character reference, silently changing the stored JSON.
pub fn encode_cp932(text: &str) -> Result<Vec<u8>, IngestError> {
    let (bytes, _, had_unmappable) = SHIFT_JIS.encode(text);
    if had_unmappable {
        let offending = text
            .chars()
            .find(|c| {
                let mut buf = [0u8; 4];
                SHIFT_JIS.encode(c.encode_utf8(&mut buf)).2
            })
            .map(|c| format!("U+{:04X}", c as u32))
            .unwrap_or_else(|| "unknown character".to_string());
        return Err(IngestError::Encoding(format!(
            "'cp932' codec can't encode character {offending}"
        )));
    }
    Ok(bytes.into_owned())
}

/// Decode cp932 bytes back into text. Used to inspect stored objects.
pub fn decode_cp932(bytes: &[u8]) -> Result<String, IngestError> {
    let (text, _, had_errors) = SHIFT_JIS.decode(bytes);
    if had_errors {
        return Err(IngestError::Encoding(
            "input is not valid cp932".to_string(),
        ));
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_unchanged() {
        let json = r#"{"userid":"user001","type":"logon","timestamp":"2025-01-01 05:00:00"}"#;
        assert_eq!(encode_cp932(json).unwrap(), json.as_bytes());
    }

    #[test]
    fn test_japanese_uses_double_byte_codes() {
        // あ is 0x82A0 in cp932
        assert_eq!(encode_cp932("あ").unwrap(), vec![0x82, 0xA0]);
        assert_eq!(decode_cp932(&[0x82, 0xA0]).unwrap(), "あ");
    }

    #[test]
    fn test_unmappable_character_is_an_error() {
        let err = encode_cp932("user😀").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("U+1F600"), "Should name the character: {msg}");
    }
}
