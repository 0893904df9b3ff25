//! Constant-time comparison and content fingerprints.

use sha2::{Digest, Sha256};
use std::hint::black_box;

/// Constant-time equality of two byte strings.
///
/// The work done depends only on `reference.len()`: there is no early exit
/// on the first differing byte, and a length mismatch still runs a full pass
/// (against `reference` itself) before failing.
///
/// ```
/// use stringent::secure_compare;
///
/// assert!(secure_compare("s3cret", "s3cret"));
/// assert!(!secure_compare("s3cre", "s3cret"));
/// ```
pub fn secure_compare(user_input: impl AsRef<[u8]>, reference: impl AsRef<[u8]>) -> bool {
    xor_fold(user_input.as_ref(), reference.as_ref(), || {})
}

/// `tick` runs once per byte pair folded.
fn xor_fold(user_input: &[u8], reference: &[u8], mut tick: impl FnMut()) -> bool {
    let length_differs = u8::from(user_input.len() != reference.len());
    let lhs = black_box(if length_differs == 0 { user_input } else { reference });

    let mut acc = length_differs;
    for (a, b) in lhs.iter().zip(reference) {
        acc |= black_box(a ^ b);
        tick();
    }
    black_box(acc) == 0
}

/// `"{byte_len}_{sha256_hex}"`, an identity fingerprint for caching and
/// deduplication.
pub fn content_hash(content: impl AsRef<[u8]>) -> String {
    let bytes = content.as_ref();
    format!("{}_{:x}", bytes.len(), Sha256::digest(bytes))
}
