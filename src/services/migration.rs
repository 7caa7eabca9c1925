//! Migration payload decoding
//!
//! The outer layers (URI, percent-encoding, base64) are handled here; the
//! payload's own wire format is left to a `MigrationDecoder` implementation.

use anyhow::{bail, Context, Result};
use base64::Engine;

use crate::logic::import::migration_payload;
use crate::model::Account;

pub trait MigrationDecoder: Send + Sync {
    /// Base64 (standard alphabet) to bytes
    fn decode_base64(&self, data: &str) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(data.trim())
            .or_else(|_| base64::engine::general_purpose::STANDARD_NO_PAD.decode(data.trim()))
            .context("Invalid migration data")
    }

    /// Payload bytes to accounts
    fn parse_payload(&self, bytes: &[u8]) -> Result<Vec<Account>>;
}

/// Decoder with no payload parser configured
#[derive(Clone, Copy, Debug, Default)]
pub struct Unsupported;

impl MigrationDecoder for Unsupported {
    fn parse_payload(&self, _bytes: &[u8]) -> Result<Vec<Account>> {
        bail!("Migration import is not configured")
    }
}

/// Full import pipeline: URI to a non-empty batch of accounts
pub fn import_accounts(decoder: &dyn MigrationDecoder, uri: &str) -> Result<Vec<Account>> {
    let payload = migration_payload(uri)?;
    let bytes = decoder.decode_base64(&payload)?;
    let accounts = decoder.parse_payload(&bytes)?;
    if accounts.is_empty() {
        bail!("No accounts found");
    }
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test decoder: payload is newline-separated `name:secret`
    struct Lines;

    impl MigrationDecoder for Lines {
        fn parse_payload(&self, bytes: &[u8]) -> Result<Vec<Account>> {
            let text = std::str::from_utf8(bytes)?;
            Ok(text
                .lines()
                .filter_map(|line| line.split_once(':'))
                .map(|(name, secret)| Account::new(name, "", secret))
                .collect())
        }
    }

    fn uri_for(payload: &str) -> String {
        let data = base64::engine::general_purpose::URL_SAFE.encode(payload);
        format!("otpauth-migration://offline?data={}", data)
    }

    #[test]
    fn test_import_pipeline() {
        let accounts = import_accounts(&Lines, &uri_for("a:AAAA\nb:BBBB")).unwrap();
        let names: Vec<_> = accounts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_batch_is_an_error() {
        let err = import_accounts(&Lines, &uri_for("nothing here")).unwrap_err();
        assert_eq!(err.to_string(), "No accounts found");
    }

    #[test]
    fn test_unsupported_decoder() {
        let err = import_accounts(&Unsupported, &uri_for("a:AAAA")).unwrap_err();
        assert_eq!(err.to_string(), "Migration import is not configured");
    }

    #[test]
    fn test_bad_base64() {
        let err = import_accounts(&Lines, "otpauth-migration://offline?data=%%%").unwrap_err();
        assert!(err.to_string().contains("Invalid"));
    }
}
