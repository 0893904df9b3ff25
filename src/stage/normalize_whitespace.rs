use crate::{
    stage::Stage,
    unicode::{has_special_lead, is_non_standard_ws},
};
use memchr::memchr;
use std::borrow::Cow;

/// Replace non-standard horizontal whitespace with regular spaces.
///
/// ## Modes
///
/// | `max_consecutive` | Effect                                                                                     |
/// |-------------------|---------------------------------------------------------------------------------------------|
/// | `None`            | every non-standard space (and TAB if `include_tabs`) becomes one `' '`, char by char         |
/// | `Some(m)`         | runs of `m` or more of `' '`, TAB (if `include_tabs`) or non-standard spaces become `m` spaces |
///
/// In `Some(m)` mode shorter runs are left untouched: with `m = 2` a lone
/// U+00A0 stays a U+00A0. `Some(0)` behaves like `Some(1)`.
///
/// ## Recognised non-standard whitespace
///
/// - U+00A0 (NBSP)
/// - U+2000..=U+200A (En/Em/Thin/Hair spaces)
/// - U+202F (NARROW NO-BREAK SPACE)
/// - U+3000 (IDEOGRAPHIC SPACE)
///
/// Line breaks are never touched; see [`NormalizeEol`](super::normalize_eol::NormalizeEol).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeWhitespace {
    /// Treat `\t` as whitespace to replace.
    pub include_tabs: bool,

    /// Collapse threshold, see the table above.
    pub max_consecutive: Option<usize>,
}

/// Char-by-char replacement, tabs included.
pub const NORMALIZE_WHITESPACE: NormalizeWhitespace = NormalizeWhitespace {
    include_tabs: true,
    max_consecutive: None,
};

/// Any horizontal run (spaces, tabs, non-standard spaces) becomes one space.
pub const COLLAPSE_WHITESPACE: NormalizeWhitespace = NormalizeWhitespace {
    include_tabs: true,
    max_consecutive: Some(1),
};

/// Like [`COLLAPSE_WHITESPACE`] but tabs are preserved.
pub const COLLAPSE_SPACES: NormalizeWhitespace = NormalizeWhitespace {
    include_tabs: false,
    max_consecutive: Some(1),
};

impl Default for NormalizeWhitespace {
    fn default() -> Self {
        NORMALIZE_WHITESPACE
    }
}

impl NormalizeWhitespace {
    pub const fn new(include_tabs: bool, max_consecutive: Option<usize>) -> Self {
        Self {
            include_tabs,
            max_consecutive,
        }
    }

    #[inline(always)]
    fn is_target(&self, c: char) -> bool {
        is_non_standard_ws(c)
            || (self.include_tabs && c == '\t')
            || (self.max_consecutive.is_some() && c == ' ')
    }

    #[inline(always)]
    fn width(&self) -> usize {
        self.max_consecutive.map_or(1, |m| m.max(1))
    }

    /// A run of exactly `width` plain spaces is already canonical.
    #[inline(always)]
    fn qualifies(&self, len: usize, plain: bool) -> bool {
        let width = self.width();
        len >= width && !(plain && len == width)
    }

    /// Byte span of the next run to replace, starting the search at `from`.
    fn next_run(&self, text: &str, from: usize) -> Option<(usize, usize)> {
        let mut start = None;
        let mut len = 0;
        let mut plain = true;

        for (off, c) in text[from..].char_indices() {
            let i = from + off;
            if self.is_target(c) {
                if self.max_consecutive.is_none() {
                    return Some((i, i + c.len_utf8()));
                }
                if start.is_none() {
                    start = Some(i);
                    len = 0;
                    plain = true;
                }
                len += 1;
                plain &= c == ' ';
                continue;
            }
            if let Some(s) = start.take() {
                if self.qualifies(len, plain) {
                    return Some((s, i));
                }
            }
        }

        start
            .filter(|_| self.qualifies(len, plain))
            .map(|s| (s, text.len()))
    }
}

impl Stage for NormalizeWhitespace {
    fn name(&self) -> &'static str {
        "normalize_whitespace"
    }

    fn needs_apply(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        // Fast path: pure ASCII without tabs has nothing to replace char by char
        if self.max_consecutive.is_none()
            && !has_special_lead(text)
            && (!self.include_tabs || memchr(b'\t', text.as_bytes()).is_none())
        {
            return false;
        }

        self.next_run(text, 0).is_some()
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        let Some(mut run) = self.next_run(&text, 0) else {
            return text;
        };

        let replacement = " ".repeat(self.width());
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        loop {
            let (start, end) = run;
            out.push_str(&text[copied..start]);
            out.push_str(&replacement);
            copied = end;
            match self.next_run(&text, end) {
                Some(next) => run = next,
                None => break,
            }
        }
        out.push_str(&text[copied..]);
        Cow::Owned(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::stage_contract::StageTestConfig;

    impl StageTestConfig for NormalizeWhitespace {
        fn samples() -> &'static [&'static str] {
            &[
                "plain text",
                "double  space",
                "tab\there",
                "nbsp\u{00A0}here",
                "   \u{2009}\u{2008}\u{200A}  ",
                "ideo\u{3000}\u{3000}graphic",
                "",
            ]
        }
    }

    fn ws(text: &str, include_tabs: bool, max_consecutive: Option<usize>) -> String {
        NormalizeWhitespace::new(include_tabs, max_consecutive)
            .apply(Cow::Borrowed(text))
            .into_owned()
    }

    #[test]
    fn contract() {
        crate::assert_stage_contract!(NORMALIZE_WHITESPACE);
        crate::assert_stage_contract!(COLLAPSE_WHITESPACE);
        crate::assert_stage_contract!(COLLAPSE_SPACES);
        crate::assert_stage_contract!(NormalizeWhitespace::new(false, Some(2)));
    }

    #[test]
    fn collapse_to_single_space() {
        let input = "this is                     one   text \nwith \u{2009}\u{2008}\u{200A}tons of ws \t\tand LF's \r\neverywhere";
        assert_eq!(
            ws(input, true, Some(1)),
            "this is one text \nwith tons of ws and LF's \r\neverywhere"
        );
    }

    #[test]
    fn collapse_keeps_one_space_at_edges() {
        let input = "   this is                     one   text \nwith \u{2009}\u{2008}\u{200A}tons of ws \t\tand LF's \r\neverywhere     ";
        assert_eq!(
            ws(input, true, Some(1)),
            " this is one text \nwith tons of ws and LF's \r\neverywhere "
        );
    }

    #[test]
    fn collapse_without_tabs_keeps_tabs() {
        let input = "this is     one more   text \nwith tons of ws \t\tand LF's \r\neverywhere";
        assert_eq!(
            ws(input, false, Some(1)),
            "this is one more text \nwith tons of ws \t\tand LF's \r\neverywhere"
        );
    }

    #[test]
    fn threshold_collapse() {
        let input = "this is     another   text \nwith \u{2009}\u{2009}tons of ws \t\tand LF's \r\neverywhere";
        assert_eq!(
            ws(input, false, Some(2)),
            "this is  another  text \nwith  tons of ws \t\tand LF's \r\neverywhere"
        );
        assert_eq!(ws(" a   b", true, Some(2)), " a  b");
    }

    #[test]
    fn runs_below_threshold_are_untouched() {
        assert_eq!(ws("a\u{00A0}b", true, Some(2)), "a\u{00A0}b");
        assert_eq!(ws("a\u{00A0}\u{00A0}b", true, Some(2)), "a  b");
        assert_eq!(ws("a \tb", true, Some(3)), "a \tb");
    }

    #[test]
    fn char_by_char_replacement() {
        assert_eq!(ws("a\u{00A0}\u{2003}\tb", true, None), "a   b");
        assert_eq!(ws("a\u{00A0}\u{2003}\tb", false, None), "a  \tb");
        // regular spaces are left alone in this mode
        assert_eq!(ws("a    b", true, None), "a    b");
    }

    #[test]
    fn zero_threshold_behaves_like_one() {
        let input = "a  \u{3000} b\t\tc";
        assert_eq!(ws(input, true, Some(0)), ws(input, true, Some(1)));
    }

    #[test]
    fn other_unicode_spaces_are_ignored() {
        // OGHAM SPACE MARK and MEDIUM MATHEMATICAL SPACE are not in the class
        let input = "a\u{1680}b\u{205F}c";
        assert!(!COLLAPSE_WHITESPACE.needs_apply(input));
        assert_eq!(ws(input, true, Some(1)), input);
    }
}
