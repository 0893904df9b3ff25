//! Core normalization stage abstraction.
//!
//! A stage is a single, pure text transformation. Stages are cheap `Copy`
//! config values (or zero-sized markers) and can be chained into a
//! [`Profile`](crate::profile::Profile), which is how the composite
//! normalizers (`normalize_text`, `normalize_title`, ...) are built.
//!
//! Every stage works on `Cow<str>`:
//!
//! * `needs_apply(&self, &str)` is a cheap, exact pre-check. When it returns
//!   `false` the stage is skipped and the input stays borrowed.
//! * `apply(&self, Cow<str>)` performs the transformation. It must return the
//!   input unchanged (same allocation) when nothing would change.
//!
//! Stages only see valid UTF-8 (`&str`), so they are total: there is no error
//! path. Malformed bytes are rejected or transcoded up front by
//! [`crate::encoding`].

pub mod capitalize;
pub mod normalization;
pub mod normalize_eol;
pub mod normalize_whitespace;
pub mod single_line;
pub mod single_whitespace;
pub mod strip_invisible;
pub mod trim;

use std::borrow::Cow;

/// A single normalisation step.
pub trait Stage: Send + Sync {
    /// Human-readable name, used in traces and test failure messages.
    fn name(&self) -> &'static str;

    /// Fast pre-check. Returning `false` skips the whole stage.
    fn needs_apply(&self, text: &str) -> bool;

    /// Allocation-aware transformation. Must always be correct, even when
    /// called without a preceding `needs_apply`.
    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str>;
}
