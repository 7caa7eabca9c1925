//! Shared types for the Model
//!
//! Form and dialog state used by the UI sub-model.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use super::account::{Account, AccountId};

/// How long add/edit/import errors stay visible
pub const FORM_STATUS_TTL: Duration = Duration::from_secs(3);

/// How long backup status messages stay visible
pub const BACKUP_STATUS_TTL: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Inline, self-dismissing message inside a dialog
#[derive(Clone, Debug)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
    pub shown_at: Instant,
    pub ttl: Duration,
}

impl StatusLine {
    pub fn new(text: impl Into<String>, kind: StatusKind, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.ttl
    }
}

/// Drop a status line once its time is up
pub fn expire_status(status: &mut Option<StatusLine>, now: Instant) {
    if status.as_ref().is_some_and(|s| s.is_expired(now)) {
        *status = None;
    }
}

/// Tabs of the add-account dialog
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddTab {
    Manual,
    Import,
}

/// Add-account dialog (manual entry or migration import)
#[derive(Clone, Debug)]
pub struct AddForm {
    pub tab: AddTab,
    pub name: String,
    pub issuer: String,
    pub secret: String,
    pub uri: String,
    /// Focused field within the manual tab (0 = name, 1 = issuer, 2 = secret)
    pub focus: usize,
    pub status: Option<StatusLine>,
}

impl AddForm {
    pub fn new() -> Self {
        Self {
            tab: AddTab::Manual,
            name: String::new(),
            issuer: String::new(),
            secret: String::new(),
            uri: String::new(),
            focus: 0,
            status: None,
        }
    }

    /// The text field receiving keystrokes
    pub fn focused_field(&mut self) -> &mut String {
        match (self.tab, self.focus) {
            (AddTab::Import, _) => &mut self.uri,
            (AddTab::Manual, 0) => &mut self.name,
            (AddTab::Manual, 1) => &mut self.issuer,
            (AddTab::Manual, _) => &mut self.secret,
        }
    }

    pub fn field_count(&self) -> usize {
        match self.tab {
            AddTab::Manual => 3,
            AddTab::Import => 1,
        }
    }
}

impl Default for AddForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Edit form for one account
#[derive(Clone, Debug)]
pub struct EditForm {
    pub id: AccountId,
    pub name: String,
    pub issuer: String,
    pub secret: String,
    pub focus: usize,
}

impl EditForm {
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            issuer: account.issuer.clone(),
            secret: account.secret_base32.clone(),
            focus: 0,
        }
    }

    pub fn focused_field(&mut self) -> &mut String {
        match self.focus {
            0 => &mut self.name,
            1 => &mut self.issuer,
            _ => &mut self.secret,
        }
    }
}

/// Edit dialog: pick an account, then edit it
#[derive(Clone, Debug)]
pub enum EditStage {
    Picking { cursor: usize },
    Editing(EditForm),
}

#[derive(Clone, Debug)]
pub struct EditDialog {
    pub stage: EditStage,
    pub status: Option<StatusLine>,
}

/// Bulk delete dialog (checkbox list)
#[derive(Clone, Debug, Default)]
pub struct DeleteSelection {
    pub checked: HashSet<AccountId>,
    pub cursor: usize,
}

impl DeleteSelection {
    pub fn toggle(&mut self, id: AccountId) {
        if !self.checked.remove(&id) {
            self.checked.insert(id);
        }
    }

    /// Select-all checkbox state: every listed account checked
    pub fn all_checked(&self, ids: &[AccountId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.checked.contains(id))
    }

    /// Select-all toggle: check everything unless everything is checked
    pub fn toggle_all(&mut self, ids: &[AccountId]) {
        if self.all_checked(ids) {
            self.checked.clear();
        } else {
            self.checked = ids.iter().copied().collect();
        }
    }
}

/// Backup/restore dialog
#[derive(Clone, Debug, Default)]
pub struct BackupForm {
    pub token: String,
    pub password: String,
    pub gist_id: String,
    /// 0 = token, 1 = password, 2 = gist id
    pub focus: usize,
    pub status: Option<StatusLine>,
}

impl BackupForm {
    pub fn focused_field(&mut self) -> &mut String {
        match self.focus {
            0 => &mut self.token,
            1 => &mut self.password,
            _ => &mut self.gist_id,
        }
    }

    /// Token and gist id are persisted as the user types; the password never is
    pub fn focus_is_persisted_setting(&self) -> bool {
        self.focus != 1
    }
}

/// Remote backup settings persisted alongside the accounts
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GitSettings {
    pub token: String,
    pub gist_id: String,
}

/// Dialogs that sit over the account list (the confirmation gate stacks on top)
#[derive(Clone, Debug)]
pub enum Modal {
    Add(AddForm),
    Edit(EditDialog),
    BulkDelete(DeleteSelection),
    Backup(BackupForm),
}
