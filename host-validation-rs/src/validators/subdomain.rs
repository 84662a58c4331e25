//! Subdomain classification
//!
//! A host counts as a subdomain when it has more than two dot-separated
//! labels. There is no public-suffix awareness: `foo.co.uk` has three labels
//! and is a "subdomain", `example.co.uk` likewise, while `co.uk` is "root".

use super::reference::split_uri_reference;
use super::{has_http_prefix, label_count};
use crate::errors::ValidationResult;
use std::borrow::Cow;

/// Classify a bare host string by splitting it on `.`
///
/// No parsing is done, so schemes and ports count towards the first and
/// last label respectively.
pub fn is_subdomain_without_scheme(input: &str) -> bool {
    label_count(input) > 2
}

/// Classify a host that may or may not carry an `http(s)://` prefix
///
/// Inputs without the prefix get `http://` prepended before splitting. The
/// authority is taken verbatim and cut at its first `:`, so numeric labels and
/// `xn--` labels are counted as written. Fails only when the normalized string
/// is not a URI reference.
pub fn is_subdomain_with_scheme(input: &str) -> ValidationResult<bool> {
    let normalized = if has_http_prefix(input) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("http://{}", input))
    };

    let parts = split_uri_reference(&normalized)?;
    let authority = parts.authority.unwrap_or_default();
    let host = authority.split(':').next().unwrap_or_default();

    Ok(label_count(host) > 2)
}

/// Classify the host of a URI parsed as-is
///
/// A reference without an authority (`example.com`, `/a/b`) has an empty host
/// and is therefore never a subdomain.
pub fn is_subdomain(input: &str) -> ValidationResult<bool> {
    let parts = split_uri_reference(input)?;
    Ok(label_count(parts.host) > 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a.b.c" => true ; "three labels")]
    #[test_case("a.b" => false ; "two labels")]
    #[test_case("a" => false ; "single label")]
    #[test_case("test.byeoungwoolee.com" => true ; "bare subdomain")]
    #[test_case("byeoungwoolee.com" => false ; "bare root")]
    #[test_case("https://test.byeoungwoolee.com" => true ; "scheme is part of first label")]
    #[test_case("https://byeoungwoolee.com" => false ; "scheme prefixed root")]
    fn test_without_scheme(input: &str) -> bool {
        is_subdomain_without_scheme(input)
    }

    #[test_case("test.example.com" => true ; "bare subdomain")]
    #[test_case("example.com" => false ; "bare root")]
    #[test_case("https://api.example.com" => true ; "https subdomain")]
    #[test_case("http://example.com" => false ; "http root")]
    #[test_case("example.com:8080" => false ; "port does not add a label")]
    #[test_case("a.b.example.com:8443" => true ; "deep subdomain with port")]
    #[test_case("foo.co.uk" => true ; "no public suffix awareness")]
    #[test_case("co.uk" => false ; "public suffix alone")]
    #[test_case("1.2" => false ; "numeric labels kept as written")]
    #[test_case("123" => false ; "single numeric label")]
    #[test_case("a.1" => false ; "numeric last label")]
    #[test_case("xn--a.example.com" => true ; "punycode label")]
    #[test_case("1.2.3.4" => true ; "dotted quad counts labels")]
    #[test_case("[::1]:8080" => false ; "bracketed literal")]
    fn test_with_scheme(input: &str) -> bool {
        is_subdomain_with_scheme(input).unwrap()
    }

    #[test]
    fn test_with_scheme_parse_failure() {
        let err = is_subdomain_with_scheme("exa mple.com").unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_as_is() {
        assert_eq!(is_subdomain("https://test.example.com"), Ok(true));
        assert_eq!(is_subdomain("https://example.com:8443/x"), Ok(false));
        // No authority without a scheme or `//`
        assert_eq!(is_subdomain("test.example.com"), Ok(false));
        assert_eq!(is_subdomain("//cdn.assets.example.com"), Ok(true));

        assert!(is_subdomain("http://bad host.example.com").is_err());
    }

    #[test]
    fn test_idempotent() {
        for input in ["a.b.c", "example.com", "https://x.y.z:1/"] {
            assert_eq!(
                is_subdomain_with_scheme(input),
                is_subdomain_with_scheme(input)
            );
            assert_eq!(
                is_subdomain_without_scheme(input),
                is_subdomain_without_scheme(input)
            );
        }
    }
}
