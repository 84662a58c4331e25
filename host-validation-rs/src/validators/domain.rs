//! Domain validators
//!
//! Format checking and subdomain expectation are separate checks here.
//! [`validate_domain`] composes them, and [`is_valid_domain`] keeps the
//! combined boolean contract: "well-formed AND subdomain status matches".

use super::reference::split_uri_reference;
use super::subdomain::is_subdomain_with_scheme;
use super::{has_http_prefix, MAX_HOST_LENGTH};
use crate::builder::ValidationBuilder;
use crate::errors::{ValidationError, ValidationResult};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Leading label of alphanumerics with inner hyphens (max 63), followed
    /// by one or more purely alphabetic labels of at least two characters
    static ref DOMAIN_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z]{2,})+$")
            .expect("domain pattern compiles");
}

/// Validate the syntactic form of a domain name
pub fn check_domain_format(domain: &str) -> ValidationResult<()> {
    ValidationBuilder::new(domain)
        .not_empty()
        .max_length(MAX_HOST_LENGTH)
        .matches(&DOMAIN_PATTERN)
        .finish()
        .map(|_| ())
}

/// Strip an `http://` / `https://` prefix, keeping only the authority
///
/// Inputs without the prefix are returned unchanged.
pub fn resolve_host(domain: &str) -> ValidationResult<&str> {
    if !has_http_prefix(domain) {
        return Ok(domain);
    }
    let parts = split_uri_reference(domain)?;
    Ok(parts.authority.unwrap_or_default())
}

/// Validate that a host's subdomain status is the expected one
pub fn check_subdomain_expectation(host: &str, expect_subdomain: bool) -> ValidationResult<()> {
    let is_sub = is_subdomain_with_scheme(host)?;
    if is_sub == expect_subdomain {
        Ok(())
    } else if expect_subdomain {
        Err(ValidationError::policy(format!(
            "'{}' is a root domain, expected a subdomain",
            host
        )))
    } else {
        Err(ValidationError::policy(format!(
            "'{}' is a subdomain, expected a root domain",
            host
        )))
    }
}

/// Validate a domain's format, then its subdomain status
pub fn validate_domain(domain: &str, expect_subdomain: bool) -> ValidationResult<()> {
    check_domain_format(domain)?;
    let host = resolve_host(domain)?;
    check_subdomain_expectation(host, expect_subdomain)
}

/// True when `domain` is well-formed and its subdomain status equals
/// `expect_subdomain`
pub fn is_valid_domain(domain: &str, expect_subdomain: bool) -> bool {
    match validate_domain(domain, expect_subdomain) {
        Ok(()) => true,
        Err(err) => {
            log::debug!("domain '{}' rejected: {}", domain, err);
            false
        }
    }
}
