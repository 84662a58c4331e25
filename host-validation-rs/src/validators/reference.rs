//! Generic URI-reference splitting
//!
//! Decomposes a string into `scheme`, `authority`, `path`, `query` and
//! `fragment` following RFC 3986 appendix B, then checks the handful of
//! things a lenient URL parser refuses: control characters, a missing or
//! malformed scheme, a non-numeric port, bad host characters and broken
//! percent escapes. Everything else is left to the policy validators.
//!
//! Unlike [`url::Url`], nothing is normalized here. Paths keep their literal
//! spaces and relative references (`/a/b`, `docs/x`) split without a base.

use crate::errors::{ValidationError, ValidationResult};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URI_REFERENCE: Regex =
        Regex::new(r"^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
            .expect("URI reference pattern compiles");
    static ref SCHEME: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").expect("scheme pattern compiles");
}

/// Borrowed components of a URI reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UriParts<'a> {
    /// Scheme as written (compare with [`UriParts::scheme_is`])
    pub scheme: Option<&'a str>,
    /// `host[:port]` with any userinfo removed
    pub authority: Option<&'a str>,
    /// Host without port; IPv6 brackets stripped. Empty when there is no authority
    pub host: &'a str,
    /// Port digits, `None` when absent or empty
    pub port: Option<&'a str>,
    /// Raw path, possibly empty
    pub path: &'a str,
    /// Raw query without the leading `?`
    pub query: Option<&'a str>,
    /// Raw fragment without the leading `#`
    pub fragment: Option<&'a str>,
}

impl<'a> UriParts<'a> {
    /// Case-insensitive scheme comparison
    pub fn scheme_is(&self, name: &str) -> bool {
        self.scheme
            .map_or(false, |scheme| scheme.eq_ignore_ascii_case(name))
    }

    /// True when the reference carries a scheme
    pub fn has_scheme(&self) -> bool {
        self.scheme.map_or(false, |scheme| !scheme.is_empty())
    }

    /// True when the query is absent or empty (`/a?` counts as empty)
    pub fn query_is_empty(&self) -> bool {
        self.query.map_or(true, str::is_empty)
    }

    /// True when the decoded path would contain a space
    pub fn path_has_space(&self) -> bool {
        self.path.contains(' ') || self.path.contains("%20")
    }
}

/// Split a URI reference into its components
pub fn split_uri_reference(input: &str) -> ValidationResult<UriParts<'_>> {
    if input.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err(ValidationError::parse("invalid control character in URI"));
    }
    if input.starts_with(':') {
        return Err(ValidationError::parse("missing protocol scheme"));
    }

    let caps = URI_REFERENCE
        .captures(input)
        .ok_or_else(|| ValidationError::parse(format!("'{}' is not a URI reference", input)))?;

    let scheme = caps.get(1).map(|m| m.as_str());
    if let Some(scheme) = scheme {
        // An invalid scheme means the first path segment holds the colon
        if !SCHEME.is_match(scheme) {
            return Err(ValidationError::parse(
                "first path segment in URI cannot contain colon",
            ));
        }
    }

    let path = caps.get(3).map_or("", |m| m.as_str());
    check_escapes(path, "path")?;

    let fragment = caps.get(5).map(|m| m.as_str());
    if let Some(fragment) = fragment {
        check_escapes(fragment, "fragment")?;
    }

    let mut parts = UriParts {
        scheme,
        path,
        query: caps.get(4).map(|m| m.as_str()),
        fragment,
        ..UriParts::default()
    };

    if let Some(raw) = caps.get(2).map(|m| m.as_str()) {
        let authority = match raw.rfind('@') {
            Some(idx) => &raw[idx + 1..],
            None => raw,
        };
        let (host, port) = split_host_port(authority)?;
        parts.authority = Some(authority);
        parts.host = host;
        parts.port = port;
    }

    Ok(parts)
}

fn split_host_port(authority: &str) -> ValidationResult<(&str, Option<&str>)> {
    let (host, port) = if let Some(rest) = authority.strip_prefix('[') {
        let end = rest
            .find(']')
            .ok_or_else(|| ValidationError::parse("missing ']' in host"))?;
        let after = &rest[end + 1..];
        let port = if after.is_empty() {
            None
        } else {
            Some(after.strip_prefix(':').ok_or_else(|| {
                ValidationError::parse(format!("invalid port '{}' after host", after))
            })?)
        };
        (&rest[..end], port)
    } else {
        match authority.rfind(':') {
            Some(idx) => (&authority[..idx], Some(&authority[idx + 1..])),
            None => (authority, None),
        }
    };

    if let Some(port) = port {
        if !port.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::parse(format!("invalid port ':{}'", port)));
        }
    }

    if let Some(bad) = host.chars().find(|&c| !is_host_char(c)) {
        return Err(ValidationError::parse(format!(
            "invalid character '{}' in host name",
            bad
        )));
    }
    check_escapes(host, "host")?;
    check_host_escapes(host)?;

    Ok((host, port.filter(|p| !p.is_empty())))
}

// Hosts may only escape non-ASCII bytes, plus `%25` for IPv6 zone ids
fn check_host_escapes(host: &str) -> ValidationResult<()> {
    let mut rest = host;
    while let Some(idx) = rest.find('%') {
        let escape = &rest[idx..idx + 3];
        if escape.as_bytes()[1] < b'8' && escape != "%25" {
            return Err(ValidationError::parse(format!(
                "invalid URL escape '{}' in host",
                escape
            )));
        }
        rest = &rest[idx + 3..];
    }
    Ok(())
}

// unreserved / sub-delims / ':' / '%', any non-ASCII
fn is_host_char(c: char) -> bool {
    !c.is_ascii()
        || c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.' | '_' | '~' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';'
                | '=' | ':' | '%'
        )
}

fn check_escapes(component: &str, what: &str) -> ValidationResult<()> {
    let bytes = component.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                let end = (i + 3).min(bytes.len());
                return Err(ValidationError::parse(format!(
                    "invalid escape '{}' in {}",
                    String::from_utf8_lossy(&bytes[i..end]),
                    what
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
