//! Byte order marks.

/// A Unicode byte order mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bom {
    Utf8,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
}

/// Match order. `FF FE 00 00` is also a valid UTF-16LE prefix, so the
/// four-byte marks come first.
const MATCH_ORDER: [Bom; 5] = [Bom::Utf32Le, Bom::Utf32Be, Bom::Utf8, Bom::Utf16Be, Bom::Utf16Le];

impl Bom {
    pub const fn bytes(self) -> &'static [u8] {
        match self {
            Bom::Utf8 => b"\xEF\xBB\xBF",
            Bom::Utf16Be => b"\xFE\xFF",
            Bom::Utf16Le => b"\xFF\xFE",
            Bom::Utf32Be => b"\x00\x00\xFE\xFF",
            Bom::Utf32Le => b"\xFF\xFE\x00\x00",
        }
    }

    /// The encoding label the mark implies.
    pub const fn label(self) -> &'static str {
        match self {
            Bom::Utf8 => "UTF-8",
            Bom::Utf16Be => "UTF-16BE",
            Bom::Utf16Le => "UTF-16LE",
            Bom::Utf32Be => "UTF-32BE",
            Bom::Utf32Le => "UTF-32LE",
        }
    }
}

/// The byte order mark `bytes` starts with, if any.
pub fn extract_bom(bytes: &[u8]) -> Option<Bom> {
    MATCH_ORDER.into_iter().find(|bom| bytes.starts_with(bom.bytes()))
}

/// `bytes` without its leading byte order mark.
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    match extract_bom(bytes) {
        Some(bom) => &bytes[bom.bytes().len()..],
        None => bytes,
    }
}
