//! Migration URI handling
//!
//! Extracts the base64 payload from an `otpauth-migration://` URI. Decoding
//! the payload itself is the migration decoder's job.

use anyhow::{bail, Context, Result};

pub const MIGRATION_PREFIX: &str = "otpauth-migration://offline?data=";

/// Pull the standard-alphabet base64 payload out of a migration URI
///
/// The data parameter is percent-decoded and its URL-safe characters are
/// mapped back (`-` to `+`, `_` to `/`).
///
/// # Examples
/// ```
/// use authtui::logic::import::migration_payload;
///
/// let uri = "otpauth-migration://offline?data=CjEKCkhlbGxvId6t%2Bg-_";
/// assert_eq!(migration_payload(uri).unwrap(), "CjEKCkhlbGxvId6t+g+/");
/// assert!(migration_payload("otpauth://totp/x").is_err());
/// ```
pub fn migration_payload(uri: &str) -> Result<String> {
    let uri = uri.trim();
    if !uri.starts_with(MIGRATION_PREFIX) {
        bail!("Invalid Google Authenticator URI");
    }
    let data = uri
        .split_once("data=")
        .map(|(_, data)| data)
        .unwrap_or_default();
    let data = data.split('&').next().unwrap_or_default();

    let decoded = urlencoding::decode(data).context("Invalid Google Authenticator URI")?;
    Ok(decoded.replace('-', "+").replace('_', "/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_other_schemes() {
        let err = migration_payload("otpauth://totp/GitHub?secret=AAAA").unwrap_err();
        assert_eq!(err.to_string(), "Invalid Google Authenticator URI");
    }

    #[test]
    fn test_trims_input() {
        let uri = format!("  {}QUJD  ", MIGRATION_PREFIX);
        assert_eq!(migration_payload(&uri).unwrap(), "QUJD");
    }

    #[test]
    fn test_percent_decoding() {
        let uri = format!("{}QUJD%3D%3D", MIGRATION_PREFIX);
        assert_eq!(migration_payload(&uri).unwrap(), "QUJD==");
    }

    #[test]
    fn test_ignores_trailing_parameters() {
        let uri = format!("{}QUJD&foo=bar", MIGRATION_PREFIX);
        assert_eq!(migration_payload(&uri).unwrap(), "QUJD");
    }
}
