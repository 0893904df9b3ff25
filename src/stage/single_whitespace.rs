//! stage/single_whitespace.rs
//! Collapse repeated horizontal whitespace.

use crate::{
    stage::{Stage, normalize_whitespace::NormalizeWhitespace},
    unicode::is_horizontal_ws,
};
use std::borrow::Cow;

/// Collapse runs of horizontal whitespace.
///
/// With `normalize = false` only runs of the *same* character shrink to one
/// instance of it: `"a   b"` → `"a b"`, `"a\t\tb"` → `"a\tb"`, but
/// `"a \tb"` is left alone and line breaks are never touched.
///
/// With `normalize = true` the work is handed to
/// [`NormalizeWhitespace`] with `max_consecutive = Some(1)`: every mixed run
/// becomes a single ASCII space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleWhitespace {
    pub normalize: bool,
    pub include_tabs: bool,
}

pub const SINGLE_WHITESPACE: SingleWhitespace = SingleWhitespace {
    normalize: false,
    include_tabs: true,
};

impl Default for SingleWhitespace {
    fn default() -> Self {
        SINGLE_WHITESPACE
    }
}

impl SingleWhitespace {
    pub const fn new(normalize: bool, include_tabs: bool) -> Self {
        Self {
            normalize,
            include_tabs,
        }
    }

    #[inline(always)]
    fn normalizer(&self) -> NormalizeWhitespace {
        NormalizeWhitespace::new(self.include_tabs, Some(1))
    }
}

impl Stage for SingleWhitespace {
    fn name(&self) -> &'static str {
        "single_whitespace"
    }

    fn needs_apply(&self, text: &str) -> bool {
        if self.normalize {
            return self.normalizer().needs_apply(text);
        }
        let mut prev = None;
        for c in text.chars() {
            if prev == Some(c) && is_horizontal_ws(c) {
                return true;
            }
            prev = Some(c);
        }
        false
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if self.normalize {
            return self.normalizer().apply(text);
        }
        if !self.needs_apply(&text) {
            return text;
        }
        let mut out = String::with_capacity(text.len());
        let mut prev = None;
        for c in text.chars() {
            if !(prev == Some(c) && is_horizontal_ws(c)) {
                out.push(c);
            }
            prev = Some(c);
        }
        Cow::Owned(out)
    }
}
