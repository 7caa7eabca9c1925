//! Backup dialog orchestration
//!
//! Validation and confirmation happen here; the jobs themselves run on the
//! service worker and report back through `handle_backup_finished` and
//! `handle_restore_finished`.

use anyhow::Result;
use ratatui::style::Color;

use crate::logic::errors::format_error_message;
use crate::model::{
    Account, BackupForm, ConfirmAction, ConfirmIcon, GitSettings, Modal, PendingConfirmation, StatusKind, StatusLine,
    BACKUP_STATUS_TTL,
};
use crate::services::ServiceRequest;
use crate::App;

pub const BACKUP_ACCENT: Color = Color::Rgb(0x3b, 0x82, 0xf6);
pub const RESTORE_ACCENT: Color = Color::Rgb(0x16, 0x65, 0x34);

impl App {
    /// Open the backup dialog pre-filled with the saved settings
    pub(crate) fn open_backup_dialog(&mut self) {
        self.model.ui.modal = Some(Modal::Backup(BackupForm {
            token: self.model.settings.token.clone(),
            gist_id: self.model.settings.gist_id.clone(),
            ..BackupForm::default()
        }));
    }

    /// Status line inside the backup dialog (toast if it was closed)
    pub(crate) fn set_backup_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        let text = text.into();
        match self.model.ui.modal.as_mut() {
            Some(Modal::Backup(form)) => {
                form.status = Some(StatusLine::new(text, kind, BACKUP_STATUS_TTL));
            }
            _ if kind == StatusKind::Error => self.model.show_toast(format!("Error: {}", text)),
            _ if kind == StatusKind::Success => self.model.show_toast(text),
            _ => {}
        }
    }

    /// Token or gist id edited: persist both right away
    pub(crate) fn autosave_git_settings(&mut self) {
        let Some(Modal::Backup(form)) = self.model.ui.modal.as_ref() else {
            return;
        };
        let settings = GitSettings {
            token: form.token.trim().to_string(),
            gist_id: form.gist_id.trim().to_string(),
        };
        if settings != self.model.settings {
            self.model.settings = settings.clone();
            self.send(ServiceRequest::SaveGitSettings(settings));
        }
    }

    /// Trimmed credentials from the dialog, or the inline error
    fn backup_credentials(&mut self) -> Option<(String, String, String)> {
        let Some(Modal::Backup(form)) = self.model.ui.modal.as_ref() else {
            return None;
        };
        let token = form.token.trim().to_string();
        let password = form.password.trim().to_string();
        let gist_id = form.gist_id.trim().to_string();

        if token.is_empty() || password.is_empty() {
            self.set_backup_status("Token and Password required", StatusKind::Error);
            return None;
        }
        Some((token, gist_id, password))
    }

    pub fn request_backup(&mut self) -> bool {
        let Some((token, gist_id, password)) = self.backup_credentials() else {
            return false;
        };
        let request = PendingConfirmation::new(
            "Backup to GitHub",
            "Overwrite existing backup for this password?",
            "Backup",
            ConfirmAction::Backup {
                token,
                gist_id,
                password,
            },
        )
        .with_accent(BACKUP_ACCENT)
        .with_icon(ConfirmIcon::CloudUpload);
        self.model.ui.confirm.open(request)
    }

    pub fn request_restore(&mut self) -> bool {
        let Some((token, gist_id, password)) = self.backup_credentials() else {
            return false;
        };
        let request = PendingConfirmation::new(
            "Restore from GitHub",
            "COMPLETELY OVERWRITE local data?",
            "Restore",
            ConfirmAction::Restore {
                token,
                gist_id,
                password,
            },
        )
        .with_accent(RESTORE_ACCENT)
        .with_icon(ConfirmIcon::CloudDownload);
        self.model.ui.confirm.open(request)
    }

    pub(crate) fn start_backup(&mut self, token: String, gist_id: String, password: String) {
        self.set_backup_status("Backing up...", StatusKind::Info);
        self.send(ServiceRequest::Backup {
            token,
            gist_id,
            password,
            accounts: self.model.store.to_vec(),
        });
    }

    pub(crate) fn start_restore(&mut self, token: String, gist_id: String, password: String) {
        self.set_backup_status("Restoring...", StatusKind::Info);
        self.send(ServiceRequest::Restore {
            token,
            gist_id,
            password,
        });
    }

    pub(crate) fn handle_backup_finished(&mut self, token: String, result: Result<String>) {
        match result {
            Ok(gist_id) => {
                // The worker already persisted these
                self.model.settings = GitSettings {
                    token,
                    gist_id: gist_id.clone(),
                };
                if let Some(Modal::Backup(form)) = self.model.ui.modal.as_mut() {
                    form.gist_id = gist_id;
                }
                self.set_backup_status("Success!", StatusKind::Success);
            }
            Err(e) => {
                tracing::warn!("backup failed: {:#}", e);
                self.set_backup_status(format_error_message(&e), StatusKind::Error);
            }
        }
    }

    pub(crate) fn handle_restore_finished(&mut self, result: Result<Vec<Account>>) {
        match result {
            Ok(accounts) => {
                self.restore_accounts(accounts);
                self.set_backup_status("Restored!", StatusKind::Success);
            }
            Err(e) => {
                tracing::warn!("restore failed: {:#}", e);
                self.set_backup_status(format_error_message(&e), StatusKind::Error);
            }
        }
    }
}
