//! OTP code computation (RFC 6238 TOTP over RFC 4226 HOTP, HMAC-SHA1)

use anyhow::{anyhow, bail, Result};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::logic::countdown::STEP_SECS;
use crate::model::{Account, OtpKind};

/// Computes the code an account shows at a given time
pub trait OtpEngine: Send + Sync {
    fn generate(&self, account: &Account, unix_secs: u64) -> Result<String>;
}

/// Time-based codes with a 30 second step
#[derive(Clone, Copy, Debug, Default)]
pub struct Totp;

impl OtpEngine for Totp {
    fn generate(&self, account: &Account, unix_secs: u64) -> Result<String> {
        if account.kind == OtpKind::Hotp {
            // No counter is stored for imported HOTP entries
            bail!("HOTP accounts are not supported");
        }
        let key = decode_secret(&account.secret_base32)?;
        hotp(&key, unix_secs / STEP_SECS, account.digits)
    }
}

/// Decode a base-32 secret, padded or not
pub fn decode_secret(secret: &str) -> Result<Vec<u8>> {
    let cleaned: String = secret
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase();
    let unpadded = cleaned.trim_end_matches('=');

    base32::decode(base32::Alphabet::Rfc4648 { padding: false }, unpadded)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| anyhow!("Invalid base-32 secret"))
}

/// HOTP value for a raw key and counter
pub fn hotp(key: &[u8], counter: u64, digits: u32) -> Result<String> {
    if !(1..=10).contains(&digits) {
        bail!("Unsupported digit count {}", digits);
    }

    let mut mac = Hmac::<Sha1>::new_from_slice(key).map_err(|e| anyhow!("HMAC key: {}", e))?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // Dynamic truncation
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = ((digest[offset] as u64 & 0x7f) << 24)
        | ((digest[offset + 1] as u64) << 16)
        | ((digest[offset + 2] as u64) << 8)
        | (digest[offset + 3] as u64);
    let code = binary % 10u64.pow(digits);

    Ok(format!("{:0>width$}", code, width = digits as usize))
}
