//! Canonical mutations
//!
//! Every operation follows the same protocol: validate, mutate the store,
//! queue a save of the full list, re-render the view. Reorder is the one
//! exception: the view has already moved, so the store is reconciled from
//! the read-back and the view is only re-stamped with the new generation.

use std::collections::HashSet;

use anyhow::Result;

use crate::logic::errors::format_error_message;
use crate::logic::validation::{validate_account_input, InputContext, ValidationError};
use crate::model::{
    Account, AccountId, AddTab, EditDialog, EditForm, EditStage, Modal, StatusKind, StatusLine, FORM_STATUS_TTL,
};
use crate::services::migration::import_accounts;
use crate::App;

impl App {
    /// Manual add
    pub fn add_account(&mut self, name: &str, issuer: &str, secret: &str) -> Result<AccountId, ValidationError> {
        let input = validate_account_input(name, issuer, secret, InputContext::Add)?;
        let id = self
            .model
            .store
            .push(Account::new(input.name, input.issuer, input.secret_base32));

        tracing::info!(%id, "account added");
        self.persist();
        self.rerender();
        Ok(id)
    }

    /// Append every account found in a migration URI
    pub fn import_migration(&mut self, uri: &str) -> Result<usize> {
        let accounts = import_accounts(self.decoder.as_ref(), uri)?;
        let count = accounts.len();
        self.model.store.extend(accounts);

        tracing::info!(count, "accounts imported");
        self.persist();
        self.rerender();
        Ok(count)
    }

    /// Update name, issuer and secret; false if the account no longer exists
    pub fn edit_account(
        &mut self,
        id: AccountId,
        name: &str,
        issuer: &str,
        secret: &str,
    ) -> Result<bool, ValidationError> {
        let input = validate_account_input(name, issuer, secret, InputContext::Edit)?;
        if !self
            .model
            .store
            .update(id, input.name, input.issuer, input.secret_base32)
        {
            tracing::warn!(%id, "edit of unknown account ignored");
            return Ok(false);
        }

        self.persist();
        self.rerender();
        Ok(true)
    }

    pub fn delete_account(&mut self, id: AccountId) -> bool {
        if self.model.store.remove(id).is_none() {
            tracing::warn!(%id, "delete of unknown account ignored");
            return false;
        }

        tracing::info!(%id, "account deleted");
        self.persist();
        self.rerender();
        true
    }

    /// Delete a set of accounts; the rest keep their relative order
    pub fn delete_accounts(&mut self, ids: &HashSet<AccountId>) -> usize {
        let removed = self.model.store.remove_many(ids);
        if removed > 0 {
            tracing::info!(removed, "accounts deleted");
            self.persist();
            self.rerender();
        }
        removed
    }

    /// Commit an order read back from the view
    pub fn commit_reorder(&mut self, order: Vec<AccountId>) -> bool {
        let before = self.model.store.generation();
        match self.model.store.apply_order(order) {
            Ok(()) => {
                if self.model.store.generation() != before {
                    self.model.view.generation = self.model.store.generation();
                    self.persist();
                }
                true
            }
            Err(e) => {
                tracing::warn!("reorder refused: {:?}", e);
                self.rerender();
                false
            }
        }
    }

    /// Replace the whole list (restore)
    pub fn restore_accounts(&mut self, accounts: Vec<Account>) {
        tracing::info!(count = accounts.len(), "list restored");
        self.model.store.replace_all(accounts);
        self.persist();
        self.rerender();
    }

    /// Enter in the add dialog
    pub(crate) fn submit_add_form(&mut self) {
        let (tab, name, issuer, secret, uri) = match self.model.ui.modal.as_ref() {
            Some(Modal::Add(f)) => (f.tab, f.name.clone(), f.issuer.clone(), f.secret.clone(), f.uri.clone()),
            _ => return,
        };

        let result = match tab {
            AddTab::Manual => self
                .add_account(&name, &issuer, &secret)
                .map(|_| None)
                .map_err(|e| e.to_string()),
            AddTab::Import => self
                .import_migration(&uri)
                .map(Some)
                .map_err(|e| format_error_message(&e)),
        };

        match result {
            Ok(imported) => {
                self.model.ui.modal = None;
                if let Some(count) = imported {
                    self.model.show_toast(format!("Imported {} accounts", count));
                }
            }
            Err(message) => {
                if let Some(Modal::Add(form)) = self.model.ui.modal.as_mut() {
                    form.status = Some(StatusLine::new(message, StatusKind::Error, FORM_STATUS_TTL));
                }
            }
        }
    }

    /// Open the edit dialog on its account picker
    pub(crate) fn open_edit_picker(&mut self) {
        self.model.ui.modal = Some(Modal::Edit(EditDialog {
            stage: EditStage::Picking { cursor: 0 },
            status: None,
        }));
    }

    /// Open the edit form for one account (picker selection or swipe-edit)
    pub(crate) fn open_edit_form(&mut self, id: AccountId) {
        let Some(account) = self.model.store.get(id) else {
            return;
        };
        self.model.ui.modal = Some(Modal::Edit(EditDialog {
            stage: EditStage::Editing(EditForm::from_account(account)),
            status: None,
        }));
    }

    /// Enter in the edit form
    pub(crate) fn submit_edit_form(&mut self) {
        let (id, name, issuer, secret) = match self.model.ui.modal.as_ref() {
            Some(Modal::Edit(EditDialog {
                stage: EditStage::Editing(f),
                ..
            })) => (f.id, f.name.clone(), f.issuer.clone(), f.secret.clone()),
            _ => return,
        };

        match self.edit_account(id, &name, &issuer, &secret) {
            Ok(_) => self.model.ui.modal = None,
            Err(e) => {
                if let Some(Modal::Edit(dialog)) = self.model.ui.modal.as_mut() {
                    dialog.status = Some(StatusLine::new(e.to_string(), StatusKind::Error, FORM_STATUS_TTL));
                }
            }
        }
    }
}
