//! stage/capitalize.rs
//! Unicode-aware `ucfirst` / `ucwords`.
//!
//! Uppercasing uses the full Unicode mapping, so a single character may
//! expand (`ß` → `SS`, `ŉ` → `ʼN`). No language-specific tailoring.

use crate::stage::Stage;
use std::borrow::Cow;

/// Uppercase the first character of the text.
#[derive(Debug, Default, Clone, Copy)]
pub struct UpperFirst;

/// Uppercase the first character of every whitespace-delimited word.
#[derive(Debug, Default, Clone, Copy)]
pub struct UpperWords;

#[inline(always)]
fn changes_when_uppercased(c: char) -> bool {
    let mut upper = c.to_uppercase();
    !(upper.next() == Some(c) && upper.next().is_none())
}

/// Whether the char at each position starts a word.
fn word_starts(text: &str) -> impl Iterator<Item = (bool, char)> + '_ {
    let mut prev_ws = true;
    text.chars().map(move |c| {
        let starts = prev_ws && !c.is_whitespace();
        prev_ws = c.is_whitespace();
        (starts, c)
    })
}

impl Stage for UpperFirst {
    fn name(&self) -> &'static str {
        "upper_first"
    }

    #[inline]
    fn needs_apply(&self, text: &str) -> bool {
        text.chars().next().is_some_and(changes_when_uppercased)
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if !self.needs_apply(&text) {
            return text;
        }
        let mut chars = text.chars();
        let mut out = String::with_capacity(text.len() + 2);
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
        }
        out.push_str(chars.as_str());
        Cow::Owned(out)
    }
}

impl Stage for UpperWords {
    fn name(&self) -> &'static str {
        "upper_words"
    }

    fn needs_apply(&self, text: &str) -> bool {
        word_starts(text).any(|(starts, c)| starts && changes_when_uppercased(c))
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if !self.needs_apply(&text) {
            return text;
        }
        let mut out = String::with_capacity(text.len() + 4);
        for (starts, c) in word_starts(&text) {
            if starts {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
        }
        Cow::Owned(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::stage_contract::StageTestConfig;

    impl StageTestConfig for UpperFirst {
        fn samples() -> &'static [&'static str] {
            &["hello world", "Hello world", "élan vital", "123 go", " leading", ""]
        }
        fn should_pass_through() -> &'static [&'static str] {
            &["Hello", "World 42", "123abc", " lower", ""]
        }
        fn should_transform() -> &'static [(&'static str, &'static str)] {
            &[
                ("this is one", "This is one"),
                ("émile", "Émile"),
                ("ßtraße", "SStraße"),
            ]
        }
    }

    impl StageTestConfig for UpperWords {
        fn samples() -> &'static [&'static str] {
            &["hello world", "Hello World", "jean-luc picard", "a\tb\nc", ""]
        }
        fn should_pass_through() -> &'static [&'static str] {
            &["Hello", "Hello World", "123 456", ""]
        }
        fn should_transform() -> &'static [(&'static str, &'static str)] {
            &[
                ("this is one text", "This Is One Text"),
                ("jean-luc picard", "Jean-luc Picard"),
                ("élodie\u{3000}ångström", "Élodie\u{3000}Ångström"),
            ]
        }
    }

    #[test]
    fn contract() {
        crate::assert_stage_contract!(UpperFirst);
        crate::assert_stage_contract!(UpperWords);
    }

    #[test]
    fn only_first_char_changes() {
        assert_eq!(UpperFirst.apply(Cow::Borrowed("ab cd")), "Ab cd");
        assert_eq!(UpperFirst.apply(Cow::Borrowed(" ab")), " ab");
    }

    #[test]
    fn words_after_any_whitespace() {
        assert_eq!(
            UpperWords.apply(Cow::Borrowed("one\ttwo\nthree\u{00A0}four")),
            "One\tTwo\nThree\u{00A0}Four"
        );
    }

    #[test]
    fn existing_capitals_are_kept() {
        assert_eq!(UpperWords.apply(Cow::Borrowed("mcDonald iPhone")), "McDonald IPhone");
    }
}
