use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::model::{Account, AccountId, GitSettings, OtpKind};

const SETTING_TOKEN: &str = "git_token";
const SETTING_GIST_ID: &str = "gist_id";

/// Key/value persistence for the account list and backup settings
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Accounts in canonical order
    async fn load_accounts(&self) -> Result<Vec<Account>>;

    /// Replace the stored list; stored order becomes `accounts` order
    async fn save_accounts(&self, accounts: &[Account]) -> Result<()>;

    async fn load_git_settings(&self) -> Result<GitSettings>;

    async fn save_git_settings(&self, settings: &GitSettings) -> Result<()>;
}

/// SQLite-backed account storage
pub struct AccountDb {
    conn: Mutex<Connection>,
}

impl AccountDb {
    /// Open (or create) the database at `path`
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        Self::with_connection(conn)
    }

    pub fn new_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let db = AccountDb {
            conn: Mutex::new(conn),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Default database location
    pub fn default_path() -> PathBuf {
        if let Some(data_dir) = dirs::data_dir() {
            data_dir.join("authtui").join("accounts.db")
        } else {
            // Fallback to the temp dir if no data dir is available
            std::env::temp_dir().join("authtui").join("accounts.db")
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| anyhow!("Database lock poisoned"))
    }

    fn init_schema(&self) -> Result<()> {
        self.lock()?.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS accounts (
                position INTEGER NOT NULL,
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                issuer TEXT NOT NULL,
                secret TEXT NOT NULL,
                kind TEXT NOT NULL,
                digits INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            ) WITHOUT ROWID;
            ",
        )?;

        Ok(())
    }

    fn read_accounts(conn: &Connection) -> Result<Vec<Account>> {
        let mut stmt = conn.prepare(
            "SELECT id, name, issuer, secret, kind, digits
             FROM accounts ORDER BY position",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let kind: String = row.get(4)?;
            Ok(Account {
                id: AccountId::parse(&id).unwrap_or_default(),
                name: row.get(1)?,
                issuer: row.get(2)?,
                secret_base32: row.get(3)?,
                kind: OtpKind::parse(&kind),
                digits: row.get(5)?,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    fn write_accounts(conn: &mut Connection, accounts: &[Account]) -> Result<()> {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM accounts", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO accounts (position, id, name, issuer, secret, kind, digits)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (position, account) in accounts.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    account.id.to_string(),
                    &account.name,
                    &account.issuer,
                    &account.secret_base32,
                    account.kind.as_str(),
                    account.digits,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn read_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(Into::into)
    }

    fn write_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[async_trait]
impl Persistence for AccountDb {
    async fn load_accounts(&self) -> Result<Vec<Account>> {
        let conn = self.lock()?;
        Self::read_accounts(&conn).context("Failed to load accounts")
    }

    async fn save_accounts(&self, accounts: &[Account]) -> Result<()> {
        let mut conn = self.lock()?;
        Self::write_accounts(&mut conn, accounts).context("Failed to save accounts")
    }

    async fn load_git_settings(&self) -> Result<GitSettings> {
        let conn = self.lock()?;
        Ok(GitSettings {
            token: Self::read_setting(&conn, SETTING_TOKEN)?.unwrap_or_default(),
            gist_id: Self::read_setting(&conn, SETTING_GIST_ID)?.unwrap_or_default(),
        })
    }

    async fn save_git_settings(&self, settings: &GitSettings) -> Result<()> {
        let conn = self.lock()?;
        Self::write_setting(&conn, SETTING_TOKEN, &settings.token)?;
        Self::write_setting(&conn, SETTING_GIST_ID, &settings.gist_id)
            .context("Failed to save backup settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_database() {
        let db = AccountDb::new_in_memory().unwrap();
        assert!(db.load_accounts().await.unwrap().is_empty());
        assert_eq!(db.load_git_settings().await.unwrap(), GitSettings::default());
    }

    #[tokio::test]
    async fn test_save_replaces_all_rows() {
        let db = AccountDb::new_in_memory().unwrap();
        let first = vec![Account::new("a", "", "AAAA"), Account::new("b", "", "BBBB")];
        db.save_accounts(&first).await.unwrap();

        let second = vec![Account::new("c", "", "CCCC")];
        db.save_accounts(&second).await.unwrap();

        let loaded = db.load_accounts().await.unwrap();
        assert_eq!(loaded, second);
    }

    #[tokio::test]
    async fn test_kind_and_digits_survive() {
        let db = AccountDb::new_in_memory().unwrap();
        let mut acc = Account::new("a", "Acme", "AAAA");
        acc.kind = OtpKind::Hotp;
        acc.digits = 8;
        db.save_accounts(std::slice::from_ref(&acc)).await.unwrap();

        let loaded = db.load_accounts().await.unwrap();
        assert_eq!(loaded[0].kind, OtpKind::Hotp);
        assert_eq!(loaded[0].digits, 8);
        assert_eq!(loaded[0].id, acc.id);
    }

    #[tokio::test]
    async fn test_git_settings_overwrite() {
        let db = AccountDb::new_in_memory().unwrap();
        let settings = GitSettings {
            token: "ghp_one".into(),
            gist_id: "abc".into(),
        };
        db.save_git_settings(&settings).await.unwrap();
        db.save_git_settings(&GitSettings {
            gist_id: "def".into(),
            ..settings
        })
        .await
        .unwrap();

        let loaded = db.load_git_settings().await.unwrap();
        assert_eq!(loaded.token, "ghp_one");
        assert_eq!(loaded.gist_id, "def");
    }
}
