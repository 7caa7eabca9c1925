//! List View
//!
//! The visual representation of the account list, derived from the store.
//! Rows carry a positional stamp that is refreshed after any visual move.
//! Rows hidden by the search filter stay in the sequence, so reading the
//! visual order back always yields every account.

use std::collections::HashMap;

use super::account::AccountId;
use super::store::AccountStore;

/// Placeholder shown before a code has been generated
pub const CODE_PLACEHOLDER: &str = "------";

/// Marker shown when code generation failed
pub const CODE_ERROR: &str = "Error";

/// What the code column shows for one row
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeCell {
    Pending,
    Code(String),
    Error,
}

impl CodeCell {
    /// Text as rendered (grouped digits, placeholder, or error marker)
    pub fn text(&self) -> String {
        match self {
            CodeCell::Pending => CODE_PLACEHOLDER.to_string(),
            CodeCell::Code(code) => crate::logic::formatting::group_code(code),
            CodeCell::Error => CODE_ERROR.to_string(),
        }
    }

    /// Raw digits, if a code is available for copying
    pub fn copyable(&self) -> Option<&str> {
        match self {
            CodeCell::Code(code) => Some(code),
            _ => None,
        }
    }
}

/// One rendered row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRow {
    pub id: AccountId,
    /// Position in the visual sequence (refreshed by `restamp`)
    pub position: usize,
    /// Filtered out by the current search query
    pub hidden: bool,
}

/// Derived visual state of the account list
#[derive(Clone, Debug, Default)]
pub struct ListView {
    rows: Vec<ListRow>,

    /// Store generation this view was derived from (or reconciled to)
    pub generation: u64,

    /// Displayed codes per account
    pub codes: HashMap<AccountId, CodeCell>,

    /// Seconds remaining in the current 30 s step, as last drawn
    pub remaining: f64,
}

impl ListView {
    /// Derive the full view from the canonical store
    pub fn derive(store: &AccountStore) -> Self {
        let visible: std::collections::HashSet<AccountId> = store.visible_ids().into_iter().collect();
        let rows = store
            .ids()
            .iter()
            .enumerate()
            .map(|(position, &id)| ListRow {
                id,
                position,
                hidden: !visible.contains(&id),
            })
            .collect();

        Self {
            rows,
            generation: store.generation(),
            codes: HashMap::new(),
            remaining: 0.0,
        }
    }

    /// All rows, hidden ones included
    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    /// Rows currently shown
    pub fn visible_rows(&self) -> impl Iterator<Item = &ListRow> {
        self.rows.iter().filter(|row| !row.hidden)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows().count()
    }

    /// Position of an account in the visual sequence
    pub fn position_of(&self, id: AccountId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Re-apply the search filter without touching order
    pub fn refilter(&mut self, store: &AccountStore) {
        let visible: std::collections::HashSet<AccountId> = store.visible_ids().into_iter().collect();
        for row in &mut self.rows {
            row.hidden = !visible.contains(&row.id);
        }
    }

    /// Move `source` so it sits immediately after `target`
    pub fn move_after(&mut self, source: AccountId, target: AccountId) -> bool {
        self.relocate(source, target, 1)
    }

    /// Move `source` so it sits immediately before `target`
    pub fn move_before(&mut self, source: AccountId, target: AccountId) -> bool {
        self.relocate(source, target, 0)
    }

    fn relocate(&mut self, source: AccountId, target: AccountId, offset: usize) -> bool {
        if source == target {
            return false;
        }
        let Some(from) = self.position_of(source) else {
            return false;
        };
        let row = self.rows.remove(from);
        let Some(to) = self.position_of(target) else {
            self.rows.insert(from, row);
            return false;
        };
        self.rows.insert(to + offset, row);
        true
    }

    /// Refresh every row's positional stamp from its place in the sequence
    pub fn restamp(&mut self) {
        for (position, row) in self.rows.iter_mut().enumerate() {
            row.position = position;
        }
    }

    /// Read the visual order back (the source of truth for reorder commits)
    pub fn read_back(&self) -> Vec<AccountId> {
        self.rows.iter().map(|row| row.id).collect()
    }

    /// Code cell for an account (pending if never generated)
    pub fn code(&self, id: AccountId) -> &CodeCell {
        self.codes.get(&id).unwrap_or(&CodeCell::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::account::Account;

    fn store() -> AccountStore {
        AccountStore::from_accounts(vec![
            Account::new("alice", "GitHub", "AAAA"),
            Account::new("bob", "GitLab", "BBBB"),
            Account::new("carol", "AWS", "CCCC"),
        ])
    }

    #[test]
    fn test_derive_round_trips_canonical_order() {
        let store = store();
        let view = ListView::derive(&store);
        assert_eq!(view.read_back(), store.ids());
        assert_eq!(view.generation, store.generation());
    }

    #[test]
    fn test_hidden_rows_remain_in_sequence() {
        let mut store = store();
        store.search_query = "git".to_string();
        let view = ListView::derive(&store);
        assert_eq!(view.rows().len(), 3);
        assert_eq!(view.visible_count(), 2);
        assert_eq!(view.read_back(), store.ids());
    }

    #[test]
    fn test_move_after_and_before() {
        let store = store();
        let ids = store.ids().to_vec();
        let mut view = ListView::derive(&store);

        assert!(view.move_after(ids[0], ids[2]));
        assert_eq!(view.read_back(), vec![ids[1], ids[2], ids[0]]);

        assert!(view.move_before(ids[0], ids[1]));
        assert_eq!(view.read_back(), vec![ids[0], ids[1], ids[2]]);
    }

    #[test]
    fn test_move_onto_self_is_noop() {
        let store = store();
        let ids = store.ids().to_vec();
        let mut view = ListView::derive(&store);
        assert!(!view.move_after(ids[1], ids[1]));
        assert_eq!(view.read_back(), ids);
    }

    #[test]
    fn test_restamp_positions() {
        let store = store();
        let ids = store.ids().to_vec();
        let mut view = ListView::derive(&store);
        view.move_before(ids[2], ids[0]);
        view.restamp();
        let stamps: Vec<(AccountId, usize)> = view.rows().iter().map(|r| (r.id, r.position)).collect();
        assert_eq!(stamps, vec![(ids[2], 0), (ids[0], 1), (ids[1], 2)]);
    }

    #[test]
    fn test_code_cell_text() {
        assert_eq!(CodeCell::Pending.text(), "------");
        assert_eq!(CodeCell::Error.text(), "Error");
        assert_eq!(CodeCell::Code("123456".into()).text(), "123 456");
        assert_eq!(CodeCell::Code("123456".into()).copyable(), Some("123456"));
        assert_eq!(CodeCell::Error.copyable(), None);
    }
}
