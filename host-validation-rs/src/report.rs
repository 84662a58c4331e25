//! Per-record evaluation
//!
//! Runs every predicate that applies to a [`ValidationRecord`] and collects
//! the verdicts. Checks are independent of each other except that subdomain
//! classification is only attempted for hosts that passed the URI check.

use crate::errors::ValidationResult;
use crate::fixture::ValidationRecord;
use crate::validators::{
    check_domain_format, is_subdomain, is_valid_base64, is_valid_path, is_valid_uri,
};

/// Verdicts for one record. `None` means the check did not apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReport {
    pub domain_valid: Option<bool>,
    pub uri_valid: Option<bool>,
    pub subdomain: Option<ValidationResult<bool>>,
    pub path_valid: Option<bool>,
    pub cert_valid: Option<bool>,
    pub pkey_valid: Option<bool>,
}

impl RecordReport {
    /// True when every check that ran passed
    pub fn all_passed(&self) -> bool {
        [
            self.domain_valid,
            self.uri_valid,
            self.path_valid,
            self.cert_valid,
            self.pkey_valid,
        ]
        .iter()
        .flatten()
        .all(|ok| *ok)
    }
}

/// Evaluate a record
pub fn evaluate(record: &ValidationRecord) -> RecordReport {
    let mut report = RecordReport {
        domain_valid: None,
        uri_valid: None,
        subdomain: None,
        path_valid: None,
        cert_valid: None,
        pkey_valid: None,
    };

    if !record.host.is_empty() {
        report.domain_valid = Some(check_domain_format(&record.host).is_ok());

        let uri_valid = is_valid_uri(&record.host, record.required_scheme);
        report.uri_valid = Some(uri_valid);
        if uri_valid {
            report.subdomain = Some(is_subdomain(&record.host));
        }
    }

    if !record.path.is_empty() {
        report.path_valid = Some(is_valid_path(&record.path));
    }

    report.cert_valid = record.cert.as_deref().map(is_valid_base64);
    report.pkey_valid = record.pkey.as_deref().map(is_valid_base64);

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(host: &str, required_scheme: bool, path: &str) -> ValidationRecord {
        ValidationRecord {
            host: host.to_string(),
            required_scheme,
            path: path.to_string(),
            ..ValidationRecord::default()
        }
    }

    #[test]
    fn test_full_record() {
        let report = evaluate(&record("https://test.example.com", true, "/a/b"));

        // The scheme keeps the raw string from matching the domain pattern
        assert_eq!(report.domain_valid, Some(false));
        assert_eq!(report.uri_valid, Some(true));
        assert_eq!(report.subdomain, Some(Ok(true)));
        assert_eq!(report.path_valid, Some(true));
        assert_eq!(report.cert_valid, None);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_bare_host() {
        let report = evaluate(&record("example.com", false, ""));

        assert_eq!(report.domain_valid, Some(true));
        assert_eq!(report.uri_valid, Some(false));
        assert_eq!(report.subdomain, None);
        assert_eq!(report.path_valid, None);
    }

    #[test]
    fn test_certificate_record() {
        let mut rec = record("", false, "");
        rec.cert = Some("Zm9vYmFy".to_string());
        rec.pkey = Some("not base64!".to_string());

        let report = evaluate(&rec);
        assert_eq!(report.domain_valid, None);
        assert_eq!(report.uri_valid, None);
        assert_eq!(report.cert_valid, Some(true));
        assert_eq!(report.pkey_valid, Some(false));
        assert!(!report.all_passed());
    }

    #[test]
    fn test_all_passed() {
        let report = evaluate(&record("", false, "/docs/index.html"));
        assert!(report.all_passed());
    }
}
