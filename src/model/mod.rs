//! Pure Application Model - Elm Architecture
//!
//! This module defines the state for the application.
//! The Model is organized into focused sub-models for maintainability:
//!
//! - **AccountStore**: canonical accounts, order, search text, generation
//! - **ListView**: rows derived from the store plus displayed codes
//! - **UiModel**: preferences, dialogs, confirmation gate, feedback
//! - **GestureRecognizer / ReorderController**: in-flight pointer sessions
//!
//! Key principles:
//! - No services: All I/O lives in the App and its worker
//! - The view is always rebuilt from the store after a canonical mutation

pub mod account;
pub mod confirm;
pub mod store;
pub mod types;
pub mod ui;
pub mod view;

pub use account::{Account, AccountId, OtpKind};
pub use confirm::{ConfirmAction, ConfirmGate, ConfirmIcon, PendingConfirmation, DANGER};
pub use store::{AccountStore, OrderError};
pub use types::*;
pub use ui::UiModel;
pub use view::{CodeCell, ListRow, ListView};

use crate::logic::gesture::{GestureConfig, GestureRecognizer};
use crate::logic::reorder::ReorderController;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    /// Canonical accounts
    pub store: AccountStore,

    /// Derived list rows and displayed codes
    pub view: ListView,

    /// UI preferences and popups
    pub ui: UiModel,

    /// Swipe / tap recognizer
    pub gesture: GestureRecognizer,

    /// Drag-to-reorder controller
    pub drag: ReorderController,

    /// Remote backup settings
    pub settings: GitSettings,
}

impl Model {
    pub fn new(accounts: Vec<Account>, vim_mode: bool, gesture: GestureConfig) -> Self {
        let store = AccountStore::from_accounts(accounts);
        let view = ListView::derive(&store);
        Self {
            store,
            view,
            ui: UiModel::new(vim_mode),
            gesture: GestureRecognizer::new(gesture),
            drag: ReorderController::new(),
            settings: GitSettings::default(),
        }
    }

    /// Rebuild the list view from the store
    ///
    /// Codes and the countdown carry over for accounts that still exist.
    /// Open gesture and drag sessions are dropped: they refer to rows of the
    /// previous view.
    pub fn rerender(&mut self) {
        let mut view = ListView::derive(&self.store);
        view.remaining = self.view.remaining;
        view.codes = std::mem::take(&mut self.view.codes)
            .into_iter()
            .filter(|(id, _)| self.store.contains(*id))
            .collect();
        self.view = view;

        self.gesture.reset();
        self.drag.drag_end();
        self.ui.clamp_cursor(self.view.visible_count());
    }

    /// Re-apply the search filter (order untouched)
    pub fn set_search(&mut self, query: String) {
        self.store.search_query = query;
        self.view.refilter(&self.store);
        self.ui.cursor = 0;
        self.ui.scroll = 0;
    }

    /// Account at a visible row index
    pub fn visible_account(&self, index: usize) -> Option<&Account> {
        let row = self.view.visible_rows().nth(index)?;
        self.store.get(row.id)
    }

    /// Account under the cursor
    pub fn selected_account(&self) -> Option<&Account> {
        self.visible_account(self.ui.cursor)
    }

    /// Check if any dialog is showing
    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.ui.show_toast(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with(names: &[&str]) -> Model {
        let accounts = names.iter().map(|n| Account::new(*n, "", "JBSWY3DP")).collect();
        Model::new(accounts, false, GestureConfig::default())
    }

    #[test]
    fn test_model_creation() {
        let model = model_with(&["a", "b"]);
        assert_eq!(model.store.len(), 2);
        assert_eq!(model.view.visible_count(), 2);
        assert!(!model.has_modal());
    }

    #[test]
    fn test_rerender_drops_codes_of_removed_accounts() {
        let mut model = model_with(&["a", "b"]);
        let ids = model.store.ids().to_vec();
        model.view.codes.insert(ids[0], CodeCell::Code("111111".into()));
        model.view.codes.insert(ids[1], CodeCell::Code("222222".into()));

        model.store.remove(ids[0]);
        model.rerender();

        assert_eq!(model.view.read_back(), vec![ids[1]]);
        assert_eq!(model.view.code(ids[1]), &CodeCell::Code("222222".into()));
        assert!(!model.view.codes.contains_key(&ids[0]));
        assert_eq!(model.view.generation, model.store.generation());
    }

    #[test]
    fn test_rerender_resets_sessions() {
        let mut model = model_with(&["a", "b"]);
        let ids = model.store.ids().to_vec();
        let generation = model.store.generation();
        assert!(model.drag.drag_start(&model.view, ids[0], (0, 0), generation));

        model.rerender();
        assert!(!model.drag.is_dragging());
        assert!(!model.gesture.is_tracking());
    }

    #[test]
    fn test_search_does_not_touch_store_order() {
        let mut model = model_with(&["alpha", "beta", "gamma"]);
        let before = model.store.ids().to_vec();

        model.set_search("bet".into());
        assert_eq!(model.view.visible_count(), 1);
        assert_eq!(model.selected_account().map(|a| a.name.as_str()), Some("beta"));
        assert_eq!(model.store.ids(), before.as_slice());
        assert_eq!(model.view.read_back(), before);
    }
}
