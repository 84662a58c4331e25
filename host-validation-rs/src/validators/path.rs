//! Path validation
//!
//! A valid path is a URI reference made of a path alone: no scheme, no
//! authority and no query. Fragments are tolerated.

use super::reference::split_uri_reference;
use crate::errors::{ValidationError, ValidationResult};

/// Validate that `s` is a bare relative or absolute path
pub fn validate_path(s: &str) -> ValidationResult<()> {
    if s.is_empty() {
        return Err(ValidationError::Empty);
    }

    let parts = split_uri_reference(s)?;

    if parts.has_scheme() {
        return Err(ValidationError::policy(format!(
            "path '{}' carries a scheme",
            s
        )));
    }
    if !parts.host.is_empty() {
        return Err(ValidationError::policy(format!(
            "path '{}' carries a host '{}'",
            s, parts.host
        )));
    }
    if !parts.query_is_empty() {
        return Err(ValidationError::policy(format!(
            "path '{}' carries a query",
            s
        )));
    }
    if parts.path.is_empty() {
        return Err(ValidationError::policy(format!(
            "'{}' has no path component",
            s
        )));
    }

    Ok(())
}

/// True when `s` passes [`validate_path`]
pub fn is_valid_path(s: &str) -> bool {
    match validate_path(s) {
        Ok(()) => true,
        Err(err) => {
            log::debug!("path '{}' rejected: {}", s, err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/a/b" => true ; "absolute path")]
    #[test_case("a/b" => true ; "relative path")]
    #[test_case("./docs/index.html" => true ; "dot relative")]
    #[test_case("/a b" => true ; "spaces are allowed in bare paths")]
    #[test_case("/a/b#section" => true ; "fragment tolerated")]
    #[test_case("/a?" => true ; "empty query")]
    #[test_case("http://x.com/a" => false ; "has host")]
    #[test_case("//x.com/a" => false ; "network path reference")]
    #[test_case("mailto:a@b.com" => false ; "has scheme")]
    #[test_case("/a?b=1" => false ; "has query")]
    #[test_case("#only" => false ; "fragment only")]
    #[test_case("/a/%zz" => false ; "bad escape")]
    #[test_case("" => false ; "empty")]
    fn test_is_valid_path(s: &str) -> bool {
        is_valid_path(s)
    }

    #[test]
    fn test_error_families() {
        assert_eq!(validate_path(""), Err(ValidationError::Empty));
        assert!(validate_path("/a/%zz").unwrap_err().is_parse_failure());
        assert!(validate_path("http://x.com/a")
            .unwrap_err()
            .is_policy_violation());
    }
}
