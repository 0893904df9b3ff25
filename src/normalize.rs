//! One-call normalizers.
//!
//! Every function here is a thin wrapper over a [`Stage`] or a
//! [`preset`] profile. Options that have defaults are passed as the stage
//! config value itself, so `Default::default()` gives the documented
//! behaviour:
//!
//! ```
//! use stringent::{normalize_eol, normalize_ws, NormalizeEol, NormalizeWhitespace};
//!
//! assert_eq!(normalize_eol("a\r\nb", NormalizeEol::default()), "a\nb");
//! assert_eq!(normalize_ws(" a   b", NormalizeWhitespace::new(true, Some(2))), " a  b");
//! ```

use crate::{
    profile::preset,
    stage::{
        Stage,
        normalize_eol::NormalizeEol,
        normalize_whitespace::NormalizeWhitespace,
        single_line::SingleLine,
        single_whitespace::SingleWhitespace,
        strip_invisible::DROP_ZERO_WIDTH,
    },
};
use std::borrow::Cow;

/// The canonical end-of-line marker.
pub const EOL: &str = "\n";

/// Strip NUL and zero-width whitespace, canonicalize line breaks to LF, then
/// apply NFC. Idempotent.
pub fn filter(text: &str) -> Cow<'_, str> {
    preset::filter().run(text)
}

/// Collapse runs of the same horizontal whitespace character, or with
/// `normalize` every horizontal run to one space.
pub fn single_ws_ize(text: &str, options: SingleWhitespace) -> Cow<'_, str> {
    options.apply(Cow::Borrowed(text))
}

/// Flatten to one line: each whitespace run holding line breaks becomes one
/// space.
pub fn single_line_ize(text: &str) -> Cow<'_, str> {
    SingleLine.apply(Cow::Borrowed(text))
}

/// Remove U+200B and U+FEFF.
pub fn drop_zw_ws(text: &str) -> Cow<'_, str> {
    DROP_ZERO_WIDTH.apply(Cow::Borrowed(text))
}

/// Replace non-standard spaces (and tabs) with ASCII spaces, optionally
/// collapsing runs above a threshold.
pub fn normalize_ws(text: &str, options: NormalizeWhitespace) -> Cow<'_, str> {
    options.apply(Cow::Borrowed(text))
}

/// Canonicalize every line break to `options.eol`.
pub fn normalize_eol(text: &str, options: NormalizeEol) -> Cow<'_, str> {
    options.apply(Cow::Borrowed(text))
}

/// [`filter`], then trim leading and trailing Unicode whitespace.
pub fn normalize_text(text: &str) -> Cow<'_, str> {
    preset::text().run(text)
}

/// [`normalize_text`], flattened to one line with single spaces and an
/// uppercase first letter.
pub fn normalize_title(text: &str) -> Cow<'_, str> {
    preset::title().run(text)
}

/// [`normalize_title`] with every word capitalized.
pub fn normalize_name(text: &str) -> Cow<'_, str> {
    preset::name().run(text)
}
