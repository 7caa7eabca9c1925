//! Account input validation
//!
//! Gate in front of add and edit: nothing that fails here reaches the store.

use thiserror::Error;

/// User-correctable input problems
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    MissingName(&'static str),
    #[error("{0}")]
    MissingSecret(&'static str),
    #[error("Invalid Secret Key")]
    InvalidSecret,
}

/// Which form is being validated (wording differs)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputContext {
    Add,
    Edit,
}

/// Validated, normalized account fields
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountInput {
    pub name: String,
    pub issuer: String,
    pub secret_base32: String,
}

/// Uppercase a secret and remove all whitespace
///
/// # Examples
/// ```
/// use authtui::logic::validation::normalize_secret;
///
/// assert_eq!(normalize_secret(" jbsw y3dp\t"), "JBSWY3DP");
/// ```
pub fn normalize_secret(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// `^[A-Z2-7]+=*$`
///
/// # Examples
/// ```
/// use authtui::logic::validation::is_base32;
///
/// assert!(is_base32("ABCDEFG"));
/// assert!(is_base32("MZXW6==="));
/// assert!(!is_base32("ABCDEFG1"));
/// assert!(!is_base32("===="));
/// ```
pub fn is_base32(secret: &str) -> bool {
    let body = secret.trim_end_matches('=');
    !body.is_empty() && body.chars().all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c))
}

/// Validate raw form fields
pub fn validate_account_input(
    name: &str,
    issuer: &str,
    secret: &str,
    context: InputContext,
) -> Result<AccountInput, ValidationError> {
    let name = name.trim();
    let issuer = issuer.trim();
    let secret = normalize_secret(secret);

    if name.is_empty() {
        return Err(ValidationError::MissingName(match context {
            InputContext::Add => "Please enter account name",
            InputContext::Edit => "Name is required",
        }));
    }
    if secret.is_empty() {
        return Err(ValidationError::MissingSecret(match context {
            InputContext::Add => "Please enter Secret Key",
            InputContext::Edit => "Secret is required",
        }));
    }
    if !is_base32(&secret) {
        return Err(ValidationError::InvalidSecret);
    }

    Ok(AccountInput {
        name: name.to_string(),
        issuer: issuer.to_string(),
        secret_base32: secret,
    })
}
