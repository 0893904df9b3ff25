//! Byte-level encoding: UTF-8 validation, BOM handling, best-effort
//! detection and conversion between charsets.
//!
//! Everything else in the crate works on `&str`; this is where raw bytes
//! are turned into one.

pub mod bom;
mod charset;

pub use bom::{Bom, extract_bom, strip_bom};

use charset::Charset;
#[cfg(feature = "simd")]
use simdutf8::{basic, compat};
use thiserror::Error;
use tracing::debug;

/// The canonical encoding.
pub const ENCODING: &str = "UTF-8";

const ISO_8859_1: &str = "ISO-8859-1";
const WINDOWS_1252: &str = "Windows-1252";

/// C1 positions windows-1252 leaves unassigned.
const UNASSIGNED_IN_1252: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),
}

/// `true` when `bytes` is well-formed UTF-8.
pub fn is_utf8(bytes: &[u8]) -> bool {
    #[cfg(feature = "simd")]
    {
        basic::from_utf8(bytes).is_ok()
    }
    #[cfg(not(feature = "simd"))]
    {
        std::str::from_utf8(bytes).is_ok()
    }
}

/// Borrow `bytes` as `&str`, or report where the UTF-8 breaks.
pub fn validate_utf8(bytes: &[u8]) -> Result<&str, EncodingError> {
    #[cfg(feature = "simd")]
    {
        compat::from_utf8(bytes).map_err(|e| EncodingError::MalformedInput(e.to_string()))
    }
    #[cfg(not(feature = "simd"))]
    {
        std::str::from_utf8(bytes).map_err(|e| EncodingError::MalformedInput(e.to_string()))
    }
}

/// Best-effort guess at the encoding of `bytes`.
///
/// Valid UTF-8 (ASCII included) is reported as [`ENCODING`]. Otherwise a
/// byte order mark decides. Failing both, the bytes are assumed to be a
/// Western single-byte charset: windows-1252 when C1 bytes (0x80..=0x9F)
/// occur and every one of them is assigned there, ISO-8859-1 otherwise.
/// ISO-8859-1 maps every byte, so it is the fallback.
pub fn detect_encoding(bytes: &[u8]) -> Option<&'static str> {
    if is_utf8(bytes) {
        return Some(ENCODING);
    }
    if let Some(bom) = extract_bom(bytes) {
        debug!(bom = bom.label(), "encoding detected from byte order mark");
        return Some(bom.label());
    }

    let mut c1 = bytes.iter().copied().filter(|b| (0x80..=0x9F).contains(b)).peekable();
    let detected = if c1.peek().is_some() && c1.all(|b| !UNASSIGNED_IN_1252.contains(&b)) {
        Some(WINDOWS_1252)
    } else {
        Some(ISO_8859_1)
    };
    debug!(?detected, len = bytes.len(), "single-byte encoding heuristic");
    detected
}

/// Re-encode `bytes` from `from` (detected when `None`) into `to`.
///
/// Labels are matched case-insensitively against the WHATWG label set plus
/// `UTF-32`, `UTF-32BE`, `UTF-32LE` and a strict `ISO-8859-1`. A leading
/// byte order mark matching the source is dropped. Malformed source
/// sequences decode to U+FFFD; characters the target cannot represent are
/// written as `?`.
pub fn convert(bytes: &[u8], from: Option<&str>, to: &str) -> Result<Vec<u8>, EncodingError> {
    let target = Charset::from_label(to)?;
    let source = source_charset(bytes, from)?;
    debug!(from = %source, to = %target, len = bytes.len(), "converting");

    if source == target && source == Charset::Utf8 && is_utf8(bytes) {
        return Ok(strip_bom(bytes).to_vec());
    }
    Ok(target.encode(&source.decode(bytes)))
}

/// [`convert`] into UTF-8, as a `String`.
pub fn to_utf8(bytes: &[u8], from: Option<&str>) -> Result<String, EncodingError> {
    let source = source_charset(bytes, from)?;
    Ok(source.decode(bytes).into_owned())
}

fn source_charset(bytes: &[u8], from: Option<&str>) -> Result<Charset, EncodingError> {
    match from {
        Some(label) => Charset::from_label(label),
        None => {
            let detected = detect_encoding(bytes).ok_or_else(|| {
                EncodingError::MalformedInput("source encoding could not be detected".to_owned())
            })?;
            Charset::from_label(detected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_validation() {
        assert!(is_utf8(b""));
        assert!(is_utf8("déjà vu".as_bytes()));
        assert!(!is_utf8(b"caf\xE9"));
        assert_eq!(validate_utf8(b"ok").unwrap(), "ok");
        let err = validate_utf8(b"ab\xFFcd").unwrap_err();
        assert!(matches!(err, EncodingError::MalformedInput(ref m) if m.contains('2')), "{err}");
    }

    #[test]
    fn detects_utf8_first() {
        assert_eq!(detect_encoding(b""), Some("UTF-8"));
        assert_eq!(detect_encoding(b"plain ascii"), Some("UTF-8"));
        assert_eq!(detect_encoding("café".as_bytes()), Some("UTF-8"));
        // a UTF-8 mark is valid UTF-8 on its own
        assert_eq!(detect_encoding(b"\xEF\xBB\xBFhi"), Some("UTF-8"));
    }

    #[test]
    fn bom_decides_when_not_utf8() {
        assert_eq!(detect_encoding(b"\xEF\xBB\xBFcaf\xE9"), Some("UTF-8"));
        assert_eq!(detect_encoding(b"\xFF\xFEh\x00i\x00"), Some("UTF-16LE"));
        assert_eq!(detect_encoding(b"\xFE\xFF\x00h\x00i"), Some("UTF-16BE"));
        assert_eq!(detect_encoding(b"\xFF\xFE\x00\x00h\x00\x00\x00"), Some("UTF-32LE"));
    }

    #[test]
    fn single_byte_heuristic() {
        assert_eq!(detect_encoding(b"caf\xE9"), Some("ISO-8859-1"));
        assert_eq!(detect_encoding(b"\x80 5 caf\xE9"), Some("Windows-1252"));
        assert_eq!(detect_encoding(b"\x81\xE9"), Some("ISO-8859-1"));
        assert_eq!(detect_encoding(b"\x80\x9D caf\xE9"), Some("ISO-8859-1"));
    }

    #[test]
    fn convert_latin1_to_utf8() {
        assert_eq!(convert(b"caf\xE9", Some("ISO-8859-1"), "UTF-8").unwrap(), "café".as_bytes());
        assert_eq!(convert(b"caf\xE9", None, "utf-8").unwrap(), "café".as_bytes());
    }

    #[test]
    fn convert_utf8_to_utf16_and_back() {
        let utf16 = convert("h€".as_bytes(), Some("UTF-8"), "UTF-16LE").unwrap();
        assert_eq!(utf16, b"h\x00\xAC\x20");
        assert_eq!(convert(&utf16, Some("utf-16le"), "UTF-8").unwrap(), "h€".as_bytes());
    }

    #[test]
    fn convert_detected_bom_source() {
        let input = b"\xFF\xFEh\x00\xE9\x00";
        assert_eq!(convert(input, None, "UTF-8").unwrap(), "hé".as_bytes());
        assert_eq!(to_utf8(input, None).unwrap(), "hé");
    }

    #[test]
    fn convert_utf8_identity_drops_bom() {
        assert_eq!(convert(b"\xEF\xBB\xBFhi", None, "UTF-8").unwrap(), b"hi");
        assert_eq!(convert(b"hi", Some("utf8"), "UTF-8").unwrap(), b"hi");
    }

    #[test]
    fn convert_errors() {
        assert!(matches!(
            convert(b"x", Some("nope"), "UTF-8"),
            Err(EncodingError::UnsupportedEncoding(l)) if l == "nope"
        ));
        assert!(matches!(
            convert(b"x", None, "nope"),
            Err(EncodingError::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn bytes_unassigned_in_1252_fall_back_to_latin1() {
        assert_eq!(convert(b"\x81\xE9", None, "UTF-8").unwrap(), "\u{81}é".as_bytes());
        assert_eq!(to_utf8(b"\x93q\x9D", None).unwrap(), "\u{93}q\u{9D}");
    }

    #[test]
    fn invalid_utf8_source_is_replaced() {
        assert_eq!(convert(b"a\xFFb", Some("UTF-8"), "UTF-8").unwrap(), "a\u{FFFD}b".as_bytes());
    }

    #[test]
    fn unmappable_target_characters() {
        assert_eq!(convert("€ ☃".as_bytes(), None, "ISO-8859-1").unwrap(), b"? ?");
        assert_eq!(convert("€ ☃".as_bytes(), None, "windows-1252").unwrap(), b"\x80 ?");
    }
}
