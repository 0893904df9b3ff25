//! Zero-copy text normalization, encoding detection and string-safety
//! primitives.
//!
//! The one-call normalizers live at the crate root and return `Cow<str>`,
//! borrowing the input whenever it is already clean:
//!
//! ```
//! use stringent::{normalize_title, secure_compare};
//!
//! assert_eq!(normalize_title("  hello\r\n  world "), "Hello world");
//! assert!(secure_compare("token", "token"));
//! ```
//!
//! Custom pipelines are composed from [`stage`]s with a [`Profile`].

pub mod encoding;
pub mod escape;
pub mod normalize;
pub mod process;
pub mod profile;
pub mod security;
pub mod stage;
pub mod unicode;


pub use encoding::{
    Bom, ENCODING, EncodingError, convert, detect_encoding, extract_bom, is_utf8, strip_bom,
    to_utf8, validate_utf8,
};
pub use escape::{QuoteStyle, escape, soft_escape, un_escape};
pub use normalize::{
    EOL, drop_zw_ws, filter, normalize_eol, normalize_name, normalize_text, normalize_title,
    normalize_ws, single_line_ize, single_ws_ize,
};
pub use profile::Profile;
pub use security::{content_hash, secure_compare};
pub use stage::Stage;
pub use stage::normalize_eol::NormalizeEol;
pub use stage::normalize_whitespace::NormalizeWhitespace;
pub use stage::single_whitespace::SingleWhitespace;
