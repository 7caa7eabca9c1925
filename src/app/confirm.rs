use crate::model::{AccountId, ConfirmAction, DeleteSelection, Modal, PendingConfirmation};
use crate::App;

impl App {
    /// Ask before deleting one account (swipe-to-delete, `d`)
    pub fn request_delete(&mut self, id: AccountId) -> bool {
        let Some(account) = self.model.store.get(id) else {
            return false;
        };
        let request = PendingConfirmation::new(
            "Delete Account",
            format!("Delete \"{}\"?", account.display_name()),
            "Delete",
            ConfirmAction::DeleteAccount { id },
        );
        self.model.ui.confirm.open(request)
    }

    /// Ask before deleting the checked accounts; nothing happens with none checked
    pub fn request_bulk_delete(&mut self) -> bool {
        let Some(Modal::BulkDelete(selection)) = self.model.ui.modal.as_ref() else {
            return false;
        };
        if selection.checked.is_empty() {
            return false;
        }

        // Canonical order, so the action is deterministic
        let ids: Vec<AccountId> = self
            .model
            .store
            .ids()
            .iter()
            .copied()
            .filter(|id| selection.checked.contains(id))
            .collect();
        let request = PendingConfirmation::new(
            "Delete Accounts",
            format!("Delete {} selected accounts?", ids.len()),
            "Delete",
            ConfirmAction::DeleteAccounts { ids },
        );
        self.model.ui.confirm.open(request)
    }

    /// Confirm button / `y`: run the deferred action once
    pub fn accept_confirmation(&mut self) {
        let Some(action) = self.model.ui.confirm.accept() else {
            return;
        };

        match action {
            ConfirmAction::DeleteAccount { id } => {
                self.delete_account(id);
            }
            ConfirmAction::DeleteAccounts { ids } => {
                self.delete_accounts(&ids.into_iter().collect());
                // The picker stays open on the shortened list
                if let Some(Modal::BulkDelete(selection)) = self.model.ui.modal.as_mut() {
                    *selection = DeleteSelection::default();
                }
            }
            ConfirmAction::Backup {
                token,
                gist_id,
                password,
            } => self.start_backup(token, gist_id, password),
            ConfirmAction::Restore {
                token,
                gist_id,
                password,
            } => self.start_restore(token, gist_id, password),
        }
    }

    /// Cancel button, `n` or Esc
    pub fn cancel_confirmation(&mut self) {
        self.model.ui.confirm.cancel();
    }
}
