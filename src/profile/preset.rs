use crate::{
    process::Process,
    profile::Profile,
    stage::{
        capitalize::{UpperFirst, UpperWords},
        normalization::NFC,
        normalize_eol::NORMALIZE_EOL_LF,
        normalize_whitespace::COLLAPSE_WHITESPACE,
        single_line::SingleLine,
        strip_invisible::STRIP_NUL_AND_ZERO_WIDTH,
        trim::Trim,
    },
};

/// NUL and zero-width removal, LF line endings, NFC.
///
/// Order matters: invisibles go first so they cannot hide a break from the
/// EOL stage, and NFC runs last on the final character sequence.
pub fn filter() -> Profile<impl Process> {
    Profile::builder("filter")
        .add_stage(STRIP_NUL_AND_ZERO_WIDTH)
        .add_stage(NORMALIZE_EOL_LF)
        .add_stage(NFC)
        .build()
}

/// A text document: [`filter`] then trim.
pub fn text() -> Profile<impl Process> {
    Profile::builder("text")
        .add_stage(STRIP_NUL_AND_ZERO_WIDTH)
        .add_stage(NORMALIZE_EOL_LF)
        .add_stage(NFC)
        .add_stage(Trim)
        .build()
}

/// One line, single spaces, first letter uppercased.
pub fn title() -> Profile<impl Process> {
    Profile::builder("title")
        .add_stage(STRIP_NUL_AND_ZERO_WIDTH)
        .add_stage(NORMALIZE_EOL_LF)
        .add_stage(NFC)
        .add_stage(Trim)
        .add_stage(SingleLine)
        .add_stage(COLLAPSE_WHITESPACE)
        .add_stage(UpperFirst)
        .build()
}

/// A person or entity name: [`title`] with every word capitalized.
pub fn name() -> Profile<impl Process> {
    Profile::builder("name")
        .add_stage(STRIP_NUL_AND_ZERO_WIDTH)
        .add_stage(NORMALIZE_EOL_LF)
        .add_stage(NFC)
        .add_stage(Trim)
        .add_stage(SingleLine)
        .add_stage(COLLAPSE_WHITESPACE)
        .add_stage(UpperFirst)
        .add_stage(UpperWords)
        .build()
}
