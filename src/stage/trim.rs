use crate::stage::Stage;
use std::borrow::Cow;

/// Strip leading and trailing whitespace, Unicode `White_Space` included
/// (NBSP, ideographic space, NEL, ...). Zero-width characters are not
/// whitespace and are kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct Trim;

impl Stage for Trim {
    fn name(&self) -> &'static str {
        "trim"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str) -> bool {
        let bytes = text.as_bytes();
        // Fast ASCII path: check first/last byte
        if bytes.first().is_some_and(u8::is_ascii_whitespace)
            || bytes.last().is_some_and(u8::is_ascii_whitespace)
        {
            return true;
        }
        // Unicode fallback (also catches VT, which is not ASCII whitespace for u8)
        text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace)
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if !self.needs_apply(&text) {
            return text;
        }
        match text {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
            Cow::Owned(mut s) => {
                let end = s.trim_end().len();
                s.truncate(end);
                let start = s.len() - s.trim_start().len();
                s.drain(..start);
                Cow::Owned(s)
            }
        }
    }
}
