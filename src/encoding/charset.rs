use super::{EncodingError, bom::Bom, extract_bom};
use encoding_rs::{Encoder, EncoderResult, Encoding, REPLACEMENT, UTF_8, UTF_16BE, UTF_16LE};
use phf::phf_map;
use std::{borrow::Cow, fmt};
use tracing::warn;

/// Substitute for characters the target encoding cannot represent.
const UNMAPPABLE: u8 = b'?';

/// A resolved encoding.
///
/// UTF-16/32 without an explicit byte order and ISO-8859-1 are handled here
/// rather than by `encoding_rs`, which folds `latin1` into windows-1252 and
/// reads bare `utf-16` as little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Charset {
    Utf8,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
    Latin1,
    Whatwg(&'static Encoding),
}

static BUILTIN_LABELS: phf::Map<&'static str, Charset> = phf_map! {
    "utf-8" => Charset::Utf8,
    "utf8" => Charset::Utf8,
    "utf-16" => Charset::Utf16Be,
    "utf-16be" => Charset::Utf16Be,
    "utf-16le" => Charset::Utf16Le,
    "utf-32" => Charset::Utf32Be,
    "utf-32be" => Charset::Utf32Be,
    "utf-32le" => Charset::Utf32Le,
    "ucs-4" => Charset::Utf32Be,
    "iso-8859-1" => Charset::Latin1,
    "iso8859-1" => Charset::Latin1,
    "iso_8859-1" => Charset::Latin1,
    "latin1" => Charset::Latin1,
    "l1" => Charset::Latin1,
};

impl Charset {
    /// Resolve a label, case-insensitively.
    pub(crate) fn from_label(label: &str) -> Result<Self, EncodingError> {
        let key = label.trim().to_ascii_lowercase();
        if let Some(&charset) = BUILTIN_LABELS.get(key.as_str()) {
            return Ok(charset);
        }
        match Encoding::for_label(key.as_bytes()) {
            Some(enc) if enc == UTF_8 => Ok(Charset::Utf8),
            Some(enc) if enc == UTF_16LE => Ok(Charset::Utf16Le),
            Some(enc) if enc == UTF_16BE => Ok(Charset::Utf16Be),
            Some(enc) if enc == REPLACEMENT => Err(EncodingError::UnsupportedEncoding(label.to_owned())),
            Some(enc) => Ok(Charset::Whatwg(enc)),
            None => Err(EncodingError::UnsupportedEncoding(label.to_owned())),
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Utf32Be => "UTF-32BE",
            Charset::Utf32Le => "UTF-32LE",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Whatwg(enc) => enc.name(),
        }
    }

    /// Decode to UTF-8, dropping a leading byte order mark that matches this
    /// charset. Malformed sequences become U+FFFD.
    pub(crate) fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        let bytes = match extract_bom(bytes) {
            Some(bom) if Charset::from(bom) == self => &bytes[bom.bytes().len()..],
            _ => bytes,
        };

        let (text, malformed) = match self {
            Charset::Utf8 => UTF_8.decode_without_bom_handling(bytes),
            Charset::Utf16Be => UTF_16BE.decode_without_bom_handling(bytes),
            Charset::Utf16Le => UTF_16LE.decode_without_bom_handling(bytes),
            Charset::Utf32Be => decode_utf32(bytes, u32::from_be_bytes),
            Charset::Utf32Le => decode_utf32(bytes, u32::from_le_bytes),
            Charset::Latin1 => (decode_latin1(bytes), false),
            Charset::Whatwg(enc) => enc.decode_without_bom_handling(bytes),
        };
        if malformed {
            warn!(charset = self.label(), "malformed input replaced with U+FFFD");
        }
        text
    }

    /// Encode UTF-8 text. Characters the charset cannot represent become `?`.
    pub(crate) fn encode(self, text: &str) -> Vec<u8> {
        let (bytes, unmappable) = match self {
            Charset::Utf8 => (text.as_bytes().to_vec(), 0),
            Charset::Utf16Be => (text.encode_utf16().flat_map(u16::to_be_bytes).collect(), 0),
            Charset::Utf16Le => (text.encode_utf16().flat_map(u16::to_le_bytes).collect(), 0),
            Charset::Utf32Be => (text.chars().flat_map(|c| u32::from(c).to_be_bytes()).collect(), 0),
            Charset::Utf32Le => (text.chars().flat_map(|c| u32::from(c).to_le_bytes()).collect(), 0),
            Charset::Latin1 => encode_latin1(text),
            Charset::Whatwg(enc) => encode_with(enc.new_encoder(), text),
        };
        if unmappable > 0 {
            warn!(charset = self.label(), unmappable, "unmappable characters replaced with '?'");
        }
        bytes
    }
}

impl From<Bom> for Charset {
    fn from(bom: Bom) -> Self {
        match bom {
            Bom::Utf8 => Charset::Utf8,
            Bom::Utf16Be => Charset::Utf16Be,
            Bom::Utf16Le => Charset::Utf16Le,
            Bom::Utf32Be => Charset::Utf32Be,
            Bom::Utf32Le => Charset::Utf32Le,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn decode_utf32(bytes: &[u8], unit: fn([u8; 4]) -> u32) -> (Cow<'_, str>, bool) {
    let chunks = bytes.chunks_exact(4);
    let truncated = !chunks.remainder().is_empty();
    let mut malformed = truncated;
    let mut out = String::with_capacity(bytes.len() / 4 + 1);
    for chunk in chunks {
        let code = unit([chunk[0], chunk[1], chunk[2], chunk[3]]);
        match char::from_u32(code) {
            Some(c) => out.push(c),
            None => {
                out.push(char::REPLACEMENT_CHARACTER);
                malformed = true;
            }
        }
    }
    if truncated {
        out.push(char::REPLACEMENT_CHARACTER);
    }
    (Cow::Owned(out), malformed)
}

fn decode_latin1(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(ascii) if bytes.is_ascii() => Cow::Borrowed(ascii),
        _ => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

fn encode_latin1(text: &str) -> (Vec<u8>, usize) {
    let mut unmappable = 0;
    let bytes = text
        .chars()
        .map(|c| {
            u8::try_from(u32::from(c)).unwrap_or_else(|_| {
                unmappable += 1;
                UNMAPPABLE
            })
        })
        .collect();
    (bytes, unmappable)
}

fn encode_with(mut encoder: Encoder, text: &str) -> (Vec<u8>, usize) {
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 1024];
    let mut rest = text;
    let mut unmappable = 0;
    loop {
        let (result, read, written) = encoder.encode_from_utf8_without_replacement(rest, &mut buf, true);
        out.extend_from_slice(&buf[..written]);
        rest = &rest[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => {
                unmappable += 1;
                out.push(UNMAPPABLE);
            }
        }
    }
    (out, unmappable)
}
