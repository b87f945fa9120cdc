//! Charset decoding of raw input bytes.
//!
//! Thin wrapper over `encoding_rs`: an encoding label is resolved the WHATWG
//! way (`iso-8859-5`, `koi8-r`, `windows-1251`, ...), with an empty label
//! meaning UTF-8. Decoding is strict; bytes that are invalid for the
//! requested encoding fail the invocation instead of being replaced.
//!
//! License: MIT OR Apache-2.0

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::errors::ExtractError;

/// Decodes `raw` according to `encoding_label` (empty means UTF-8).
///
/// Borrows the input when it is already valid UTF-8 under the requested
/// encoding. Fails with [`ExtractError::UnsupportedEncoding`] for an unknown
/// label and [`ExtractError::InvalidByteSequence`] for malformed input.
pub fn decode<'a>(raw: &'a [u8], encoding_label: &str) -> Result<Cow<'a, str>, ExtractError> {
    let encoding = resolve_encoding(encoding_label)?;
    let (text, had_errors) = encoding.decode_without_bom_handling(raw);
    if had_errors {
        return Err(ExtractError::InvalidByteSequence(encoding.name().to_owned()));
    }
    debug!("decoded {} bytes as {} ({} chars)", raw.len(), encoding.name(), text.chars().count());
    Ok(text)
}

fn resolve_encoding(label: &str) -> Result<&'static Encoding, ExtractError> {
    if label.is_empty() {
        return Ok(UTF_8);
    }
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ExtractError::UnsupportedEncoding(label.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_label_decodes_utf8() {
        let text = decode("августа\r\n".as_bytes(), "").unwrap();
        assert_eq!(text, "августа\r\n");
        assert!(matches!(text, Cow::Borrowed(_)));
    }

    #[test]
    fn iso_8859_5_maps_cyrillic() {
        let raw = [0xd0, 0xd2, 0xd3, 0xe3, 0xe1, 0xe2, 0xd0, 0x0d, 0x0a];
        assert_eq!(decode(&raw, "iso-8859-5").unwrap(), "августа\r\n");
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = decode(b"x", "klingon-8").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedEncoding(_)));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = decode(&[0xff, 0xfe, 0x00], "utf-8").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidByteSequence(_)));
    }

    #[test]
    fn label_is_case_insensitive_and_trimmed() {
        let raw = [0xd2, 0xeb];
        assert_eq!(decode(&raw, " ISO-8859-5 ").unwrap(), "вы");
    }
}
