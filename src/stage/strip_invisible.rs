//! stage/strip_invisible.rs
//! Remove zero-width whitespace (U+200B, U+FEFF) and, optionally, NUL.

use crate::{stage::Stage, unicode::is_zero_width_ws};
use memchr::{memchr, memchr2};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripInvisible {
    /// Also remove U+0000.
    pub nul: bool,
}

/// NUL + zero-width whitespace, the first step of `filter`.
pub const STRIP_NUL_AND_ZERO_WIDTH: StripInvisible = StripInvisible { nul: true };

/// Zero-width whitespace only.
pub const DROP_ZERO_WIDTH: StripInvisible = StripInvisible { nul: false };

impl Default for StripInvisible {
    fn default() -> Self {
        STRIP_NUL_AND_ZERO_WIDTH
    }
}

impl StripInvisible {
    #[inline(always)]
    fn is_removed(&self, c: char) -> bool {
        is_zero_width_ws(c) || (self.nul && c == '\0')
    }
}

impl Stage for StripInvisible {
    fn name(&self) -> &'static str {
        if self.nul {
            "strip_nul_and_zero_width"
        } else {
            "drop_zero_width"
        }
    }

    #[inline]
    fn needs_apply(&self, text: &str) -> bool {
        let bytes = text.as_bytes();
        if self.nul && memchr(0, bytes).is_some() {
            return true;
        }
        // U+200B is E2 80 8B, U+FEFF is EF BB BF
        memchr2(0xE2, 0xEF, bytes).is_some() && text.chars().any(is_zero_width_ws)
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if !self.needs_apply(&text) {
            return text;
        }
        Cow::Owned(text.chars().filter(|&c| !self.is_removed(c)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::stage_contract::StageTestConfig;

    impl StageTestConfig for StripInvisible {
        fn samples() -> &'static [&'static str] {
            &[
                "nul\0byte",
                "zero\u{200B}width",
                "\u{FEFF}bom at start",
                "mixed\0\u{200B}\u{FEFF}\0",
                "\u{200C}joiners stay\u{200D}",
                "",
            ]
        }
        fn should_transform() -> &'static [(&'static str, &'static str)] {
            &[
                ("a\0b", "ab"),
                ("an\u{FEFF}other", "another"),
                ("every\u{200B}where\0", "everywhere"),
            ]
        }
    }

    #[test]
    fn contract() {
        crate::assert_stage_contract!(STRIP_NUL_AND_ZERO_WIDTH);
    }

    #[test]
    fn drop_zero_width_keeps_nul() {
        let out = DROP_ZERO_WIDTH.apply(Cow::Borrowed("a\0\u{200B}b\u{FEFF}"));
        assert_eq!(out, "a\0b");
        assert!(!DROP_ZERO_WIDTH.needs_apply("a\0b"));
    }

    #[test]
    fn other_e2_sequences_are_not_stripped() {
        // U+2028 shares the E2 lead byte with U+200B
        let input = "line\u{2028}sep \u{2009}thin";
        assert!(!DROP_ZERO_WIDTH.needs_apply(input));
        let out = DROP_ZERO_WIDTH.apply(Cow::Borrowed(input));
        assert!(matches!(out, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()));
    }
}
