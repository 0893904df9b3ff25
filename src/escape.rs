//! HTML special-character escaping on top of `html-escape`.
//!
//! Only the markup-significant characters are touched (`&`, `<`, `>` and,
//! depending on [`QuoteStyle`], the quotes). Everything else, non-ASCII
//! included, passes through as UTF-8.

use memchr::memchr;
use std::borrow::Cow;

/// Which quote characters are escaped / unescaped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Double quotes only.
    #[default]
    Compat,
    /// Double and single quotes.
    Quotes,
    /// Neither.
    NoQuotes,
}

impl QuoteStyle {
    fn encode<'a>(self, text: &'a str) -> Cow<'a, str> {
        match self {
            QuoteStyle::Compat => html_escape::encode_double_quoted_attribute(text),
            QuoteStyle::Quotes => html_escape::encode_quoted_attribute(text),
            QuoteStyle::NoQuotes => html_escape::encode_text(text),
        }
    }

    fn encode_to_string(self, text: &str, out: &mut String) {
        match self {
            QuoteStyle::Compat => {
                html_escape::encode_double_quoted_attribute_to_string(text, out);
            }
            QuoteStyle::Quotes => {
                html_escape::encode_quoted_attribute_to_string(text, out);
            }
            QuoteStyle::NoQuotes => {
                html_escape::encode_text_to_string(text, out);
            }
        }
    }

    /// Characters that `un_escape` may restore under this style.
    fn decodes(self, c: char) -> bool {
        match c {
            '&' | '<' | '>' => true,
            '"' => self != QuoteStyle::NoQuotes,
            '\'' => self == QuoteStyle::Quotes,
            _ => false,
        }
    }
}

/// Escape HTML special characters.
///
/// With `hard_escape` every `&` is escaped, so `&amp;` becomes `&amp;amp;`.
/// Without it, existing character references are left as they are (see
/// [`soft_escape`]).
pub fn escape(text: &str, style: QuoteStyle, hard_escape: bool) -> Cow<'_, str> {
    if hard_escape {
        return style.encode(text);
    }

    let bytes = text.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut pos = 0;

    while let Some(found) = memchr(b'&', &bytes[pos..]) {
        let amp = pos + found;
        pos = amp + 1;
        let Some(len) = reference_len(&text[amp..]) else {
            continue;
        };
        if !is_known_reference(&text[amp..amp + len]) {
            continue;
        }
        let buf = out.get_or_insert_with(|| String::with_capacity(text.len() + 16));
        style.encode_to_string(&text[copied..amp], buf);
        buf.push_str(&text[amp..amp + len]);
        copied = amp + len;
        pos = copied;
    }

    match out {
        None => style.encode(text),
        Some(mut buf) => {
            style.encode_to_string(&text[copied..], &mut buf);
            Cow::Owned(buf)
        }
    }
}

/// Escape without double-encoding existing character references:
/// `"a & b &amp; c"` becomes `"a &amp; b &amp; c"`.
pub fn soft_escape(text: &str, style: QuoteStyle) -> Cow<'_, str> {
    escape(text, style, false)
}

/// Decode the references [`escape`] produces (`&amp;`, `&lt;`, `&gt;`, and
/// the quotes allowed by `style`, in named, decimal or hex form). Other
/// entities such as `&eacute;` are left untouched.
pub fn un_escape(text: &str, style: QuoteStyle) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut pos = 0;

    while let Some(found) = memchr(b'&', &bytes[pos..]) {
        let amp = pos + found;
        pos = amp + 1;
        let Some(len) = reference_len(&text[amp..]) else {
            continue;
        };
        let reference = &text[amp..amp + len];
        let decoded = html_escape::decode_html_entities(reference);
        let mut chars = decoded.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            continue;
        };
        if decoded == reference || !style.decodes(c) {
            continue;
        }
        let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
        buf.push_str(&text[copied..amp]);
        buf.push(c);
        copied = amp + len;
        pos = copied;
    }

    match out {
        None => Cow::Borrowed(text),
        Some(mut buf) => {
            buf.push_str(&text[copied..]);
            Cow::Owned(buf)
        }
    }
}

/// Length of the syntactic character reference at the start of `s`
/// (`&name;`, `&#123;`, `&#x1F;`), if any.
fn reference_len(s: &str) -> Option<usize> {
    const MAX_NAME: usize = 32;
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'&') {
        return None;
    }

    let (body_start, is_digit): (usize, fn(&u8) -> bool) = match (bytes.get(1), bytes.get(2)) {
        (Some(b'#'), Some(b'x' | b'X')) => (3, u8::is_ascii_hexdigit),
        (Some(b'#'), _) => (2, u8::is_ascii_digit),
        (Some(b), _) if b.is_ascii_alphabetic() => (1, u8::is_ascii_alphanumeric),
        _ => return None,
    };

    let body = bytes[body_start..]
        .iter()
        .take(MAX_NAME + 1)
        .take_while(|&&b| is_digit(&b))
        .count();
    if body == 0 || body > MAX_NAME {
        return None;
    }
    let end = body_start + body;
    (bytes.get(end) == Some(&b';')).then_some(end + 1)
}

/// Numeric references must name a scalar value other than NUL; named ones
/// must be known to the HTML entity table as a whole. A legacy prefix match
/// (`&notx;` decoding to `¬x;`) leaves the tail behind and does not count.
fn is_known_reference(reference: &str) -> bool {
    if let Some(numeric) = reference.strip_prefix("&#") {
        let digits = numeric.trim_end_matches(';');
        let code = match digits.strip_prefix(|c: char| c == 'x' || c == 'X') {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => digits.parse::<u32>(),
        };
        return code.ok().filter(|&c| c != 0).and_then(char::from_u32).is_some();
    }
    let decoded = html_escape::decode_html_entities(reference);
    decoded != reference && decoded.chars().count() <= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_escape_double_encodes() {
        assert_eq!(
            escape("<a href=\"x\">&amp;</a>", QuoteStyle::Compat, true),
            "&lt;a href=&quot;x&quot;&gt;&amp;amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn soft_escape_keeps_references() {
        assert_eq!(
            soft_escape("a & b &amp; c &#39; &#x27; &eacute; <", QuoteStyle::Compat),
            "a &amp; b &amp; c &#39; &#x27; &eacute; &lt;"
        );
    }

    #[test]
    fn soft_escape_rejects_unknown_and_broken_references() {
        assert_eq!(
            soft_escape("&bogus; &amp &#; &#xZZ; &notx;", QuoteStyle::Compat),
            "&amp;bogus; &amp;amp &amp;#; &amp;#xZZ; &amp;notx;"
        );
    }

    #[test]
    fn soft_escape_rejects_invalid_code_points() {
        assert_eq!(
            soft_escape("&#0; &#xD800; &#99999999; &#x110000; &#65; &#x41; &#x10FFFF;", QuoteStyle::Compat),
            "&amp;#0; &amp;#xD800; &amp;#99999999; &amp;#x110000; &#65; &#x41; &#x10FFFF;"
        );
    }

    #[test]
    fn quote_styles() {
        let input = "\"it's\"";
        assert_eq!(escape(input, QuoteStyle::Compat, true), "&quot;it's&quot;");
        assert_eq!(escape(input, QuoteStyle::NoQuotes, true), input);
        let both = escape(input, QuoteStyle::Quotes, true);
        assert!(both.starts_with("&quot;it&"));
        assert!(!both.contains('\''));
        assert_eq!(un_escape(&both, QuoteStyle::Quotes), input);
    }

    #[test]
    fn clean_text_is_borrowed() {
        let input = "plain text, déjà vu";
        assert!(matches!(escape(input, QuoteStyle::Compat, true), Cow::Borrowed(_)));
        assert!(matches!(soft_escape(input, QuoteStyle::Compat), Cow::Borrowed(_)));
        assert!(matches!(un_escape(input, QuoteStyle::Compat), Cow::Borrowed(_)));
    }

    #[test]
    fn un_escape_decodes_special_chars_only() {
        assert_eq!(
            un_escape("&lt;b&gt; &amp;amp; &quot;q&quot; &#39;s&#39; &eacute;", QuoteStyle::Compat),
            "<b> &amp; \"q\" &#39;s&#39; &eacute;"
        );
        assert_eq!(un_escape("&quot;&#34;&#x22;", QuoteStyle::NoQuotes), "&quot;&#34;&#x22;");
        assert_eq!(un_escape("&#39;&#x27;&apos;", QuoteStyle::Quotes), "'''");
        assert_eq!(un_escape("&#60;&#x3E;", QuoteStyle::Compat), "<>");
    }

    #[test]
    fn escape_then_unescape_restores() {
        let input = "Tom & \"Jerry\" <3 'cheese'";
        for style in [QuoteStyle::Compat, QuoteStyle::Quotes, QuoteStyle::NoQuotes] {
            assert_eq!(un_escape(&escape(input, style, true), style), input, "{style:?}");
        }
    }

    #[test]
    fn reference_syntax() {
        assert_eq!(reference_len("&amp;rest"), Some(5));
        assert_eq!(reference_len("&#169;"), Some(6));
        assert_eq!(reference_len("&#xA9;"), Some(6));
        assert_eq!(reference_len("&amp"), None);
        assert_eq!(reference_len("&;"), None);
        assert_eq!(reference_len("& amp;"), None);
        assert_eq!(reference_len("&1abc;"), None);
    }
}
