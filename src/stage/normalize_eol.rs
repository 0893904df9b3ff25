use crate::{
    stage::Stage,
    unicode::{contains_line_break, is_line_break, is_ws, line_break_len},
};
use std::borrow::Cow;

/// Canonicalize line endings.
///
/// Every line break (CR, LF, CRLF, VT, FF, NEL, LS, PS), together with the
/// whitespace sitting right before it, is rewritten to `eol`.
///
/// | `max_consecutive` | Behaviour                                                                   |
/// |-------------------|------------------------------------------------------------------------------|
/// | `None`            | one `eol` per break event; only whitespace directly before a break is eaten |
/// | `Some(1)`         | one `eol` per whitespace run that holds breaks, interior whitespace included |
/// | `Some(m)`, m > 1  | as `None`, then runs of more than `m` consecutive `eol` are capped to `m`    |
///
/// `Some(0)` behaves like `Some(1)`.
///
/// Whitespace that follows the last break of a run is kept, so indentation
/// survives: `"a \n  b"` becomes `"a\n  b"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeEol {
    pub max_consecutive: Option<usize>,
    pub eol: &'static str,
}

/// Canonical form: every break event becomes one LF.
pub const NORMALIZE_EOL_LF: NormalizeEol = NormalizeEol {
    max_consecutive: None,
    eol: "\n",
};

/// Every run of breaks (and the whitespace between them) becomes one LF.
pub const SINGLE_EOL: NormalizeEol = NormalizeEol {
    max_consecutive: Some(1),
    eol: "\n",
};

/// Windows line endings, one per break event.
pub const NORMALIZE_EOL_CRLF: NormalizeEol = NormalizeEol {
    max_consecutive: None,
    eol: "\r\n",
};

impl Default for NormalizeEol {
    fn default() -> Self {
        NORMALIZE_EOL_LF
    }
}

impl NormalizeEol {
    pub const fn new(max_consecutive: Option<usize>, eol: &'static str) -> Self {
        Self {
            max_consecutive,
            eol,
        }
    }

    /// Whether [`rewrite`](Self::rewrite) would return `text` unchanged.
    /// Walks the same spans without building the output.
    fn is_canonical(&self, text: &str) -> bool {
        let greedy = matches!(self.max_consecutive, Some(0 | 1));
        let cap = self.max_consecutive.filter(|_| !greedy);
        let mut ws_start: Option<usize> = None;
        let mut run_break_end: Option<usize> = None;
        let mut prev_end: Option<usize> = None;
        let mut streak = 0usize;
        let mut i = 0;

        while i < text.len() {
            if let Some(len) = line_break_len(text, i) {
                let end = i + len;
                if greedy {
                    ws_start.get_or_insert(i);
                    run_break_end = Some(end);
                } else {
                    let start = ws_start.take().unwrap_or(i);
                    if text[start..end] != *self.eol {
                        return false;
                    }
                    streak = if prev_end == Some(start) { streak + 1 } else { 1 };
                    if cap.is_some_and(|max| streak > max) {
                        return false;
                    }
                    prev_end = Some(end);
                }
                i = end;
                continue;
            }
            let Some(c) = text[i..].chars().next() else {
                break;
            };
            if is_ws(c) {
                ws_start.get_or_insert(i);
            } else {
                let start = ws_start.take();
                if let (Some(start), Some(end)) = (start, run_break_end.take()) {
                    if text[start..end] != *self.eol {
                        return false;
                    }
                }
            }
            i += c.len_utf8();
        }

        match (ws_start, run_break_end) {
            (Some(start), Some(end)) => text[start..end] == *self.eol,
            _ => true,
        }
    }

    fn rewrite(&self, text: &str) -> String {
        match self.max_consecutive {
            None => replace_break_events(text, self.eol, None),
            Some(0 | 1) => replace_break_runs(text, self.eol),
            Some(max) => replace_break_events(text, self.eol, Some(max)),
        }
    }
}

impl Stage for NormalizeEol {
    fn name(&self) -> &'static str {
        "normalize_eol"
    }

    fn needs_apply(&self, text: &str) -> bool {
        contains_line_break(text) && !self.is_canonical(text)
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if !self.needs_apply(&text) {
            return text;
        }
        Cow::Owned(self.rewrite(&text))
    }
}

/// Lazy `\s*?\R` replacement: each break, plus the whitespace right before
/// it, becomes `eol`. With `cap`, adjacent replacements beyond `cap` are
/// dropped.
pub(crate) fn replace_break_events(text: &str, eol: &str, cap: Option<usize>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut ws_start: Option<usize> = None;
    let mut streak = 0usize;
    let mut i = 0;

    while i < text.len() {
        if let Some(len) = line_break_len(text, i) {
            let start = ws_start.take().unwrap_or(i);
            if start == copied && streak > 0 {
                streak += 1;
            } else {
                streak = 1;
            }
            out.push_str(&text[copied..start]);
            if cap.is_none_or(|max| streak <= max) {
                out.push_str(eol);
            }
            i += len;
            copied = i;
            continue;
        }
        let Some(c) = text[i..].chars().next() else {
            break;
        };
        if is_ws(c) {
            ws_start.get_or_insert(i);
        } else {
            ws_start = None;
        }
        i += c.len_utf8();
    }

    out.push_str(&text[copied..]);
    out
}

/// Greedy `\s*\R+` replacement: in every whitespace run that contains at
/// least one break, everything up to and including the last break becomes
/// `replacement`.
pub(crate) fn replace_break_runs(text: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut ws_start: Option<usize> = None;
    let mut last_break_end: Option<usize> = None;

    let flush = |out: &mut String, copied: &mut usize, start: usize, end: usize| {
        out.push_str(&text[*copied..start]);
        out.push_str(replacement);
        *copied = end;
    };

    for (i, c) in text.char_indices() {
        if is_ws(c) {
            ws_start.get_or_insert(i);
            if is_line_break(c) {
                last_break_end = Some(i + c.len_utf8());
            }
            continue;
        }
        if let (Some(start), Some(end)) = (ws_start.take(), last_break_end.take()) {
            flush(&mut out, &mut copied, start, end);
        }
    }
    if let (Some(start), Some(end)) = (ws_start, last_break_end) {
        flush(&mut out, &mut copied, start, end);
    }

    out.push_str(&text[copied..]);
    out
}
