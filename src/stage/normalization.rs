use crate::stage::Stage;
use std::{borrow::Cow, sync::LazyLock};

use icu_normalizer::{ComposingNormalizer, ComposingNormalizerBorrowed};

// ── ICU4X ──
static ICU4X_NFC: LazyLock<ComposingNormalizerBorrowed> =
    LazyLock::new(ComposingNormalizer::new_nfc);

/// Unicode Normalization Form C (Canonical Composition), the last step of
/// `filter`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NfcStage;

pub const NFC: NfcStage = NfcStage;

impl Stage for NfcStage {
    fn name(&self) -> &'static str {
        "nfc"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str) -> bool {
        // NFC never changes ASCII
        !text.is_ascii() && !ICU4X_NFC.is_normalized(text)
    }

    #[inline(always)]
    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if !self.needs_apply(&text) {
            return text;
        }
        Cow::Owned(ICU4X_NFC.normalize(text.as_ref()).into_owned())
    }
}
