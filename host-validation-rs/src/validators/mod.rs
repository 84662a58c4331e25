//! Validator functions and utilities
//!
//! Each validator comes in two flavours: `validate_*` returns a
//! [`ValidationResult`](crate::ValidationResult) so callers can tell a parse
//! failure from a policy violation, and `is_*` collapses that to `bool`.

pub mod domain;
pub mod encoding;
pub mod path;
pub mod reference;
pub mod subdomain;
pub mod uri;

// Re-export all validators for convenience
pub use domain::*;
pub use encoding::*;
pub use path::*;
pub use reference::*;
pub use subdomain::*;
pub use uri::*;

/// Maximum length of a full host name
pub const MAX_HOST_LENGTH: usize = 253;

/// Maximum length of a single label
pub const MAX_LABEL_LENGTH: usize = 63;

/// True when every character is an ASCII letter, digit or hyphen.
///
/// The empty string passes; callers that need a non-empty label check that
/// separately.
pub fn is_label_chars(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// True when `s` starts with a lowercase `http://` or `https://` prefix
pub(crate) fn has_http_prefix(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Number of dot-separated labels in `host` (an empty host has one)
pub(crate) fn label_count(host: &str) -> usize {
    host.split('.').count()
}
