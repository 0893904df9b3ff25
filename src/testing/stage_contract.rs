use crate::stage::Stage;
use std::borrow::Cow;

/// Trait that stages implement to opt into the universal test suite.
pub trait StageTestConfig: Stage + Sized {
    /// General test samples (may or may not trigger changes)
    fn samples() -> &'static [&'static str] {
        &[
            "Hello World 123",
            " déjà-vu ",
            "tabs\tand\t\tspaces  ",
            "lines\r\nand\rbreaks\n",
            "",
        ]
    }

    /// Samples that should pass through unchanged (zero-copy test).
    ///
    /// Default: common ASCII patterns that most stages should pass through unchanged.
    fn should_pass_through() -> &'static [&'static str] {
        &[
            "hello",   // Simple lowercase
            "world",   // Another simple word
            "test123", // Alphanumeric
            "abc def", // Simple phrase with space
            "",        // Empty string
        ]
    }

    /// Input/output pairs that verify correct transformations.
    ///
    /// Return empty slice if stage doesn't have predictable transformations.
    fn should_transform() -> &'static [(&'static str, &'static str)] {
        &[]
    }
}

/// Assert that a stage satisfies the universal stage contracts.
///
/// 1. `zero_copy_when_no_changes` → no allocation when input == output
/// 2. `stage_is_idempotent` → applying twice yields same result as once
/// 3. `needs_apply_is_accurate` → correctly predicts whether apply() would change text
/// 4. `handles_empty_string_and_ascii` → graceful on edge cases
/// 5. `no_panic_on_mixed_scripts` → survives real-world multilingual input
/// 6. `transforms_as_expected` → known input/output pairs hold
#[macro_export]
macro_rules! assert_stage_contract {
    ($stage:expr) => {
        $crate::testing::stage_contract::zero_copy_when_no_changes($stage);
        $crate::testing::stage_contract::stage_is_idempotent($stage);
        $crate::testing::stage_contract::needs_apply_is_accurate($stage);
        $crate::testing::stage_contract::handles_empty_string_and_ascii($stage);
        $crate::testing::stage_contract::no_panic_on_mixed_scripts($stage);
        $crate::testing::stage_contract::transforms_as_expected($stage);
    };
}

// ============================================================================
// Universal contract tests
// ============================================================================

const MIXED_SCRIPTS: &[&str] = &[
    "Hello 世界 русский Türkçe العربية 简体中文",
    "\u{00A0}nbsp\u{2003}em\u{3000}ideo\u{202F}narrow",
    "cr\rlf\ncrlf\r\nvt\x0Bff\x0Cnel\u{0085}ls\u{2028}ps\u{2029}",
    "zero\u{200B}width\u{FEFF}nul\0",
    "cafe\u{0301} ﬁ ①",
    "ǆungla ßtraße ŉ",
];

pub fn zero_copy_when_no_changes<S: StageTestConfig>(stage: S) {
    for &input in S::samples() {
        let mut text = Cow::Borrowed(input);

        // First pass – respect needs_apply
        if stage.needs_apply(&text) {
            text = stage.apply(text);
        } else {
            let out = stage.apply(Cow::Borrowed(input));
            assert!(
                matches!(out, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()),
                "stage `{}` allocated although needs_apply() was false on `{input:?}`",
                stage.name()
            );
        }

        // Second pass – must never allocate again
        let old_ptr = text.as_ref() as *const str;
        if stage.needs_apply(&text) {
            text = stage.apply(text);
        }
        assert_eq!(
            old_ptr,
            text.as_ref() as *const str,
            "zero-copy violated on second pass of `{}` (input: `{input:?}`)",
            stage.name()
        );
    }

    // Pass-through samples must always be zero-copy and unchanged
    for &pass_through in S::should_pass_through() {
        let text = stage.apply(Cow::Borrowed(pass_through));
        assert_eq!(text.as_ref(), pass_through);
        assert!(
            matches!(text, Cow::Borrowed(s) if s.as_ptr() == pass_through.as_ptr()),
            "zero-copy violated on pass-through sample of `{}` (input: `{pass_through:?}`)",
            stage.name()
        );
    }
}

pub fn stage_is_idempotent<S: StageTestConfig>(stage: S) {
    for &input in S::samples().iter().chain(MIXED_SCRIPTS) {
        let once = stage.apply(Cow::Borrowed(input));
        let twice = stage.apply(once.clone());
        assert_eq!(
            once,
            twice,
            "apply() of `{}` not idempotent on `{input:?}`",
            stage.name()
        );
    }
}

pub fn needs_apply_is_accurate<S: StageTestConfig>(stage: S) {
    for &sample in S::samples()
        .iter()
        .chain(S::should_pass_through())
        .chain(MIXED_SCRIPTS)
    {
        check_accuracy(&stage, sample);
    }
    for &(input, _) in S::should_transform() {
        check_accuracy(&stage, input);
    }
}

#[inline(always)]
fn check_accuracy<S: Stage>(stage: &S, input: &str) {
    let predicted = stage.needs_apply(input);
    // Owned input so that stages which always rebuild are not penalised.
    let output = stage.apply(Cow::Owned(input.to_owned()));
    let actually_changes = output != input;
    assert_eq!(
        predicted,
        actually_changes,
        "needs_apply() mismatch for stage `{}` on `{input:?}`\n\
         predicted: {predicted}\n\
         actual   : {actually_changes} (output = {output:?})",
        stage.name(),
    );
}

pub fn handles_empty_string_and_ascii<S: StageTestConfig>(stage: S) {
    let empty: &str = "";
    assert!(!stage.needs_apply(empty), "`{}` wants to touch \"\"", stage.name());
    assert_eq!(stage.apply(Cow::Borrowed(empty)).as_ref(), "");

    for &ascii in S::should_pass_through() {
        assert!(!stage.needs_apply(ascii));
        assert_eq!(stage.apply(Cow::Borrowed(ascii)).as_ref(), ascii);
    }
}

pub fn no_panic_on_mixed_scripts<S: StageTestConfig>(stage: S) {
    for &input in MIXED_SCRIPTS {
        let _ = stage.apply(Cow::Borrowed(input));
    }
}

pub fn transforms_as_expected<S: StageTestConfig>(stage: S) {
    for &(input, expected) in S::should_transform() {
        let out = stage.apply(Cow::Borrowed(input));
        assert_eq!(
            out.as_ref(),
            expected,
            "stage `{}` on `{input:?}`",
            stage.name()
        );
    }
}
