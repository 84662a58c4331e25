//! URI validators
//!
//! Host policy: names only. A host must contain a dot, may not start or end
//! with one, and IP literals are refused outright even when well-formed.

use super::reference::split_uri_reference;
use super::{is_label_chars, MAX_HOST_LENGTH, MAX_LABEL_LENGTH};
use crate::errors::{ValidationError, ValidationResult};
use std::net::IpAddr;

/// Schemes accepted when a scheme is required
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Validate a URI against the host, port and path policy
///
/// With `require_scheme` the scheme must be `http` or `https`; without it any
/// scheme (or none) passes, but a host is still required.
pub fn validate_uri(uri: &str, require_scheme: bool) -> ValidationResult<()> {
    if uri.is_empty() {
        return Err(ValidationError::Empty);
    }

    let parts = split_uri_reference(uri)?;

    if require_scheme && !ALLOWED_SCHEMES.iter().any(|s| parts.scheme_is(s)) {
        return Err(ValidationError::policy(format!(
            "scheme '{}' is not one of {:?}",
            parts.scheme.unwrap_or_default(),
            ALLOWED_SCHEMES
        )));
    }

    let host = parts.host;
    if host.is_empty() {
        return Err(ValidationError::policy("URI has no host component"));
    }
    if !host.contains('.') || host.starts_with('.') || host.ends_with('.') {
        return Err(ValidationError::policy(format!(
            "host '{}' must contain a dot and may not start or end with one",
            host
        )));
    }
    check_host_name(host)?;

    if let Some(port) = parts.port {
        match port.parse::<u32>() {
            Ok(p) if (1..=65535).contains(&p) => {}
            _ => {
                return Err(ValidationError::policy(format!(
                    "port {} is outside 1-65535",
                    port
                )))
            }
        }
    }

    if parts.path_has_space() {
        return Err(ValidationError::policy(format!(
            "path '{}' contains a space",
            parts.path
        )));
    }

    Ok(())
}

fn check_host_name(host: &str) -> ValidationResult<()> {
    if host.parse::<IpAddr>().is_ok() {
        return Err(ValidationError::policy(format!(
            "IP address hosts are not allowed: {}",
            host
        )));
    }
    if host.len() > MAX_HOST_LENGTH {
        return Err(ValidationError::TooLong {
            len: host.len(),
            max: MAX_HOST_LENGTH,
        });
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return Err(ValidationError::policy(format!(
            "host '{}' needs at least two labels",
            host
        )));
    }
    for label in labels {
        if label.is_empty() || label.len() > MAX_LABEL_LENGTH || !is_label_chars(label) {
            return Err(ValidationError::policy(format!(
                "invalid label '{}' ({} characters)",
                label,
                label.len()
            )));
        }
    }
    Ok(())
}

/// True when `uri` passes [`validate_uri`]
pub fn is_valid_uri(uri: &str, require_scheme: bool) -> bool {
    match validate_uri(uri, require_scheme) {
        Ok(()) => true,
        Err(err) => {
            log::debug!("URI '{}' rejected: {}", uri, err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("http://example.com/path", true => true ; "plain http")]
    #[test_case("https://www.example.com:8443/a/b?q=1", true => true ; "https with port and query")]
    #[test_case("HTTPS://Example.COM", true => true ; "scheme case insensitive")]
    #[test_case("ftp://example.com", true => false ; "ftp scheme")]
    #[test_case("ftp://example.com", false => true ; "any scheme when not required")]
    #[test_case("example.com", true => false ; "missing scheme")]
    #[test_case("example.com", false => false ; "no authority means no host")]
    #[test_case("//cdn.example.com/x", false => true ; "network path reference")]
    #[test_case("http://192.168.0.1", true => false ; "ipv4 literal")]
    #[test_case("http://[2001:db8::1]/", true => false ; "ipv6 literal")]
    #[test_case("http://localhost:8080", true => false ; "dotless host")]
    #[test_case("http://.example.com", true => false ; "leading dot")]
    #[test_case("http://example.com.", true => false ; "trailing dot")]
    #[test_case("http://a..com", true => false ; "empty label")]
    #[test_case("http://under_score.example.com", true => false ; "underscore in label")]
    #[test_case("http://-dash-.example.com", true => true ; "hyphen anywhere")]
    #[test_case("http://127.1.x", true => true ; "digits are labels not an ip")]
    #[test_case("http://example.com:0", true => false ; "port zero")]
    #[test_case("http://example.com:65535", true => true ; "max port")]
    #[test_case("http://example.com:65536", true => false ; "port overflow")]
    #[test_case("http://example.com:99999999999", true => false ; "huge port")]
    #[test_case("http://example.com:", true => true ; "empty port")]
    #[test_case("http://example.com/a b", true => false ; "space in path")]
    #[test_case("http://example.com/a%20b", true => false ; "encoded space in path")]
    #[test_case("http://example.com/a?q=a b", true => true ; "space in query is fine")]
    #[test_case("http://exa mple.com", true => false ; "space in host fails to parse")]
    #[test_case("http://ex%41mple.com", true => false ; "escaped ascii in host")]
    #[test_case("http://b%C3%BCcher.example.com", true => false ; "escaped non ascii label")]
    #[test_case("", false => false ; "empty")]
    fn test_is_valid_uri(uri: &str, require_scheme: bool) -> bool {
        is_valid_uri(uri, require_scheme)
    }

    #[test]
    fn test_long_hosts() {
        let label = "a".repeat(63);
        let host = format!("{}.{}.{}.{}", label, label, label, "b".repeat(61));
        assert_eq!(host.len(), 253);
        assert!(is_valid_uri(&format!("http://{}", host), true));

        let host = format!("{}x", host);
        assert_eq!(
            validate_uri(&format!("http://{}", host), true),
            Err(ValidationError::TooLong { len: 254, max: 253 })
        );

        let long_label = format!("http://{}.com", "a".repeat(64));
        assert!(!is_valid_uri(&long_label, true));
    }

    #[test]
    fn test_error_families() {
        assert!(validate_uri("http://exa mple.com", true)
            .unwrap_err()
            .is_parse_failure());
        assert!(validate_uri("ftp://example.com", true)
            .unwrap_err()
            .is_policy_violation());
        assert_eq!(validate_uri("", true), Err(ValidationError::Empty));
    }
}
