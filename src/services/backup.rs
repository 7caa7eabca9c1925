//! Encrypted remote backup
//!
//! The encryption scheme and the remote transport are collaborators; this
//! module wires them into the backup and restore jobs the worker runs.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use crate::model::Account;

/// Password-based encryption of the serialized account list
pub trait BackupCrypto: Send + Sync {
    /// Remote file name derived from the password
    fn backup_filename(&self, password: &str) -> Result<String>;

    fn encrypt(&self, plaintext: &str, password: &str) -> Result<String>;

    fn decrypt(&self, ciphertext: &str, password: &str) -> Result<String>;
}

/// Remote storage for encrypted backups
#[async_trait]
pub trait RemoteBackup: Send + Sync {
    /// Upload `data` as `filename`; returns the gist id actually used
    async fn backup(&self, token: &str, gist_id: &str, data: &str, filename: &str) -> Result<String>;

    /// Download `filename` from the gist
    async fn restore(&self, token: &str, gist_id: &str, filename: &str) -> Result<String>;
}

/// Placeholder for builds without a backup provider
#[derive(Clone, Copy, Debug, Default)]
pub struct Unconfigured;

impl BackupCrypto for Unconfigured {
    fn backup_filename(&self, _password: &str) -> Result<String> {
        bail!("Backup encryption is not configured")
    }

    fn encrypt(&self, _plaintext: &str, _password: &str) -> Result<String> {
        bail!("Backup encryption is not configured")
    }

    fn decrypt(&self, _ciphertext: &str, _password: &str) -> Result<String> {
        bail!("Backup encryption is not configured")
    }
}

#[async_trait]
impl RemoteBackup for Unconfigured {
    async fn backup(&self, _token: &str, _gist_id: &str, _data: &str, _filename: &str) -> Result<String> {
        bail!("Remote backup is not configured")
    }

    async fn restore(&self, _token: &str, _gist_id: &str, _filename: &str) -> Result<String> {
        bail!("Remote backup is not configured")
    }
}

/// Encrypt and upload the list; returns the gist id to remember
pub async fn run_backup(
    crypto: &dyn BackupCrypto,
    remote: &dyn RemoteBackup,
    token: &str,
    gist_id: &str,
    password: &str,
    accounts: &[Account],
) -> Result<String> {
    let filename = crypto.backup_filename(password)?;
    let json = serde_json::to_string(accounts).context("Failed to serialize accounts")?;
    let encrypted = crypto.encrypt(&json, password)?;
    remote.backup(token, gist_id, &encrypted, &filename).await
}

/// Download and decrypt a backup into a full account list
pub async fn run_restore(
    crypto: &dyn BackupCrypto,
    remote: &dyn RemoteBackup,
    token: &str,
    gist_id: &str,
    password: &str,
) -> Result<Vec<Account>> {
    let filename = crypto.backup_filename(password)?;
    let encrypted = remote.restore(token, gist_id, &filename).await?;
    let json = crypto.decrypt(&encrypted, password)?;
    serde_json::from_str(&json).context("Backup is not a valid account list")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Reverses the text and tags it with the password
    struct Mirror;

    impl BackupCrypto for Mirror {
        fn backup_filename(&self, password: &str) -> Result<String> {
            Ok(format!("backup-{}.enc", password.len()))
        }

        fn encrypt(&self, plaintext: &str, password: &str) -> Result<String> {
            Ok(format!("{}|{}", password, plaintext.chars().rev().collect::<String>()))
        }

        fn decrypt(&self, ciphertext: &str, password: &str) -> Result<String> {
            match ciphertext.split_once('|') {
                Some((tag, body)) if tag == password => Ok(body.chars().rev().collect()),
                _ => bail!("Wrong password"),
            }
        }
    }

    #[derive(Default)]
    struct MemoryGist {
        files: Mutex<HashMap<(String, String), String>>,
    }

    #[async_trait]
    impl RemoteBackup for MemoryGist {
        async fn backup(&self, _token: &str, gist_id: &str, data: &str, filename: &str) -> Result<String> {
            let id = if gist_id.is_empty() { "new-gist".to_string() } else { gist_id.to_string() };
            self.files
                .lock()
                .unwrap()
                .insert((id.clone(), filename.to_string()), data.to_string());
            Ok(id)
        }

        async fn restore(&self, _token: &str, gist_id: &str, filename: &str) -> Result<String> {
            self.files
                .lock()
                .unwrap()
                .get(&(gist_id.to_string(), filename.to_string()))
                .cloned()
                .context("Backup not found")
        }
    }

    #[tokio::test]
    async fn test_backup_then_restore() {
        let remote = MemoryGist::default();
        let accounts = vec![Account::new("a", "Acme", "AAAA"), Account::new("b", "", "BBBB")];

        let gist = run_backup(&Mirror, &remote, "tok", "", "pw", &accounts).await.unwrap();
        assert_eq!(gist, "new-gist");

        let restored = run_restore(&Mirror, &remote, "tok", &gist, "pw").await.unwrap();
        assert_eq!(restored, accounts);
    }

    #[tokio::test]
    async fn test_restore_with_wrong_password() {
        let remote = MemoryGist::default();
        let accounts = vec![Account::new("a", "", "AAAA")];
        run_backup(&Mirror, &remote, "tok", "g1", "pw", &accounts).await.unwrap();

        // Same filename length, different password
        let err = run_restore(&Mirror, &remote, "tok", "g1", "xy").await.unwrap_err();
        assert_eq!(err.to_string(), "Wrong password");
    }

    #[tokio::test]
    async fn test_unconfigured_fails_cleanly() {
        let err = run_backup(&Unconfigured, &Unconfigured, "t", "", "p", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "Backup encryption is not configured");
    }
}
