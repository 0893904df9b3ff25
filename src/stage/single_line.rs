//! stage/single_line.rs
//! Flatten multi-line text: each run of whitespace holding line breaks
//! becomes one space.

use crate::{
    stage::{Stage, normalize_eol::replace_break_runs},
    unicode::contains_line_break,
};
use std::borrow::Cow;

/// Replaces every `\s*\R+` run with a single space.
///
/// Whitespace before the last break of a run is absorbed; horizontal
/// whitespace after it is kept as-is, so `"with \n\n\n tons"` becomes
/// `"with  tons"`. Pair with a whitespace stage to collapse the remainder.
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleLine;

impl Stage for SingleLine {
    fn name(&self) -> &'static str {
        "single_line"
    }

    #[inline]
    fn needs_apply(&self, text: &str) -> bool {
        contains_line_break(text)
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if !self.needs_apply(&text) {
            return text;
        }
        Cow::Owned(replace_break_runs(&text, " "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::stage_contract::StageTestConfig;

    impl StageTestConfig for SingleLine {
        fn should_transform() -> &'static [(&'static str, &'static str)] {
            &[
                ("a\nb", "a b"),
                ("a \r\n\r\n b", "a  b"),
                ("trailing\n", "trailing "),
                ("\u{2028}leading", " leading"),
            ]
        }
    }

    #[test]
    fn contract() {
        crate::assert_stage_contract!(SingleLine);
    }

    #[test]
    fn flattens_mixed_breaks() {
        let input = "this is\r\r\none text \n\x0C\nwith \n\n\n tons of ws \x0C\tand LF's \r\nevery\x0Bwhere";
        assert_eq!(
            SingleLine.apply(Cow::Borrowed(input)),
            "this is one text with  tons of ws \tand LF's every where"
        );
    }

    #[test]
    fn flattens_indented_continuation_lines() {
        let input = "this is\r\r\none more text \n\x0C\nwith \n
                \n
                \r\n
                \n tons of ws \x0C\tand LF's \r\nevery\x0Bwhere";
        assert_eq!(
            SingleLine.apply(Cow::Borrowed(input)),
            "this is one more text with  tons of ws \tand LF's every where"
        );
    }
}
