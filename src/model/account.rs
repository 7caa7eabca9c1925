//! Account records
//!
//! An account is one credential entry in the list. Identity is a stable
//! surrogate `AccountId`; the position in the list lives in the store's
//! order vector, never in the record itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for an account (survives reorders and deletes of siblings)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        AccountId(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(AccountId)
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// OTP algorithm family
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OtpKind {
    #[default]
    Totp,
    Hotp,
}

impl OtpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpKind::Totp => "TOTP",
            OtpKind::Hotp => "HOTP",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "HOTP" => OtpKind::Hotp,
            _ => OtpKind::Totp,
        }
    }
}

fn default_digits() -> u32 {
    6
}

/// A single credential entry
///
/// Serialized with the field names used by backups (`secretBase32`, `type`),
/// so lists written by older clients restore without conversion. Records
/// without an `id` get a fresh one on load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default)]
    pub id: AccountId,
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(alias = "secret")]
    pub secret_base32: String,
    #[serde(rename = "type", default)]
    pub kind: OtpKind,
    #[serde(default = "default_digits")]
    pub digits: u32,
}

impl Account {
    /// Create a TOTP account with default digits
    pub fn new(name: impl Into<String>, issuer: impl Into<String>, secret_base32: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            issuer: issuer.into(),
            secret_base32: secret_base32.into(),
            kind: OtpKind::Totp,
            digits: default_digits(),
        }
    }

    /// Primary label: issuer when present, otherwise the account name
    pub fn display_name(&self) -> &str {
        if self.issuer.is_empty() {
            &self.name
        } else {
            &self.issuer
        }
    }

    /// Secondary label, shown only when issuer and name are both set and differ
    pub fn secondary_name(&self) -> Option<&str> {
        if !self.issuer.is_empty() && !self.name.is_empty() && self.issuer != self.name {
            Some(&self.name)
        } else {
            None
        }
    }
}
