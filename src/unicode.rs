// Character classes shared by every stage.
//
// Each class is kept twice: as an inclusive range table (the data) and as a
// `const fn` predicate compiled down to a `matches!` (the hot path). The
// tables are the reference; `tables_agree_with_predicates` keeps both in sync.

/// U+200B zero width space, U+FEFF zero width no-break space.
pub const ZERO_WIDTH_WS: &[(char, char)] = &[('\u{200B}', '\u{200B}'), ('\u{FEFF}', '\u{FEFF}')];

/// Space-like code points other than ASCII space and tab.
///
/// - U+00A0 no-break space
/// - U+2000..=U+200A en quad through hair space
/// - U+202F narrow no-break space
/// - U+3000 ideographic space
pub const NON_STANDARD_WS: &[(char, char)] = &[
    ('\u{00A0}', '\u{00A0}'),
    ('\u{2000}', '\u{200A}'),
    ('\u{202F}', '\u{202F}'),
    ('\u{3000}', '\u{3000}'),
];

/// Single code points recognised as a line break. CRLF is matched as one unit
/// by [`line_break_len`].
pub const LINE_BREAKS: &[(char, char)] = &[
    ('\n', '\r'), // LF, VT, FF, CR
    ('\u{0085}', '\u{0085}'),
    ('\u{2028}', '\u{2029}'),
];

#[inline(always)]
pub const fn is_zero_width_ws(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{FEFF}')
}

#[inline(always)]
pub const fn is_non_standard_ws(c: char) -> bool {
    matches!(c, '\u{00A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{3000}')
}

#[inline(always)]
pub const fn is_line_break(c: char) -> bool {
    matches!(c, '\n'..='\r' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

/// Horizontal whitespace, the PCRE `\h` set.
#[inline(always)]
pub const fn is_horizontal_ws(c: char) -> bool {
    matches!(
        c,
        '\t' | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{180E}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Generic whitespace as PCRE's Unicode `\s` sees it: `White_Space=Yes` plus
/// U+180E MONGOLIAN VOWEL SEPARATOR, which left `White_Space` in Unicode 6.3
/// but is still part of `\h`. Every line break is whitespace.
#[inline(always)]
pub fn is_ws(c: char) -> bool {
    c.is_whitespace() || c == '\u{180E}'
}

/// Byte length of the line break starting at `i`, CRLF counted as one break.
#[inline]
pub fn line_break_len(text: &str, i: usize) -> Option<usize> {
    let rest = &text[i..];
    if rest.starts_with("\r\n") {
        return Some(2);
    }
    match rest.chars().next() {
        Some(c) if is_line_break(c) => Some(c.len_utf8()),
        _ => None,
    }
}

#[inline]
pub fn in_table(table: &[(char, char)], c: char) -> bool {
    table.iter().any(|&(lo, hi)| lo <= c && c <= hi)
}

// Byte-level pre-scans. Every non-ASCII member of the classes above is
// encoded with one of these lead bytes, so a text without them can skip the
// char-level scan entirely.

/// Lead bytes of U+0085 / U+00A0 (0xC2), U+1680 / U+180E (0xE1),
/// U+2000..U+2029 / U+202F / U+205F (0xE2), U+3000 (0xE3) and U+FEFF (0xEF).
#[inline(always)]
pub const fn could_be_special_start(b: u8) -> bool {
    matches!(b, 0xC2 | 0xE1 | 0xE2 | 0xE3 | 0xEF)
}

#[inline]
pub fn has_special_lead(text: &str) -> bool {
    text.bytes().any(could_be_special_start)
}

/// True when the text contains any line break, ASCII or not.
#[inline]
pub fn contains_line_break(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.iter().any(|&b| (b'\n'..=b'\r').contains(&b))
        || (has_special_lead(text) && text.chars().any(is_line_break))
}
