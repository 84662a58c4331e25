//! Encoded payload checks

use crate::errors::{ValidationError, ValidationResult};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use std::borrow::Cow;

/// Standard alphabet with mandatory padding. Non-zero trailing bits in the
/// last quantum are accepted.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical)
        .with_decode_allow_trailing_bits(true),
);

/// Validate that `s` decodes as padded standard base64
///
/// Line breaks (`\r`, `\n`) are ignored, so wrapped PEM-style bodies pass.
pub fn validate_base64(s: &str) -> ValidationResult<()> {
    let input: Cow<'_, str> = if s.contains(['\r', '\n']) {
        Cow::Owned(s.chars().filter(|c| !matches!(c, '\r' | '\n')).collect())
    } else {
        Cow::Borrowed(s)
    };

    STANDARD_LENIENT
        .decode(input.as_bytes())
        .map(|_| ())
        .map_err(|e| ValidationError::parse(format!("invalid base64: {}", e)))
}

/// True when `s` passes [`validate_base64`]
pub fn is_valid_base64(s: &str) -> bool {
    match validate_base64(s) {
        Ok(()) => true,
        Err(err) => {
            log::debug!("{}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    #[test]
    fn test_encoded_bytes_round_trip() {
        let samples: [&[u8]; 6] = [
            b"",
            b"f",
            b"fo",
            b"foo",
            b"\x00\xff\x10\x80",
            b"-----BEGIN CERTIFICATE-----",
        ];
        for bytes in samples {
            assert!(is_valid_base64(&STANDARD.encode(bytes)), "{:?}", bytes);
        }
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(!is_valid_base64("Zm9v!"));
        assert!(!is_valid_base64("Zm9"));
        // URL-safe alphabet is not standard
        assert!(!is_valid_base64("-_-_"));
        // Padding is required
        assert!(!is_valid_base64("Zg"));
        assert!(validate_base64("Zm9v!").unwrap_err().is_parse_failure());
    }

    #[test]
    fn test_lenient_decoding() {
        assert!(is_valid_base64("Zm9v\r\nYmFy"));
        // "Zh==" carries non-zero trailing bits
        assert!(is_valid_base64("Zh=="));
    }
}
