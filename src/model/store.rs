//! Account Store
//!
//! Canonical account data: records keyed by `AccountId` plus an explicit
//! order vector. Every canonical mutation bumps `generation`, which gesture
//! and drag sessions capture so that outcomes computed against an older list
//! can be recognized and dropped.

use std::collections::{HashMap, HashSet};

use super::account::{Account, AccountId};
use crate::logic::search;

/// Why a proposed order was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    LengthMismatch { expected: usize, got: usize },
    UnknownId(AccountId),
    Duplicate(AccountId),
}

/// Canonical ordered list of accounts plus transient list state
#[derive(Clone, Debug, Default)]
pub struct AccountStore {
    records: HashMap<AccountId, Account>,
    order: Vec<AccountId>,

    /// Current search query (raw, as typed)
    pub search_query: String,

    /// Last epoch second at which codes were regenerated
    pub last_epoch: Option<u64>,

    generation: u64,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an ordered list (e.g. loaded from persistence)
    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        let mut store = Self::new();
        for account in accounts {
            store.insert(account);
        }
        store.generation = 0;
        store
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn contains(&self, id: AccountId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.records.get(&id)
    }

    /// Current position of an account in canonical order
    pub fn index_of(&self, id: AccountId) -> Option<usize> {
        self.order.iter().position(|&other| other == id)
    }

    /// Canonical order of ids
    pub fn ids(&self) -> &[AccountId] {
        &self.order
    }

    /// Accounts in canonical order
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Ordered copy of all accounts, as handed to persistence and backups
    pub fn to_vec(&self) -> Vec<Account> {
        self.iter().cloned().collect()
    }

    /// Ids matching the current search query, in canonical order
    ///
    /// Filtering never touches the canonical data.
    pub fn visible_ids(&self) -> Vec<AccountId> {
        self.iter()
            .filter(|acc| search::account_matches(acc, &self.search_query))
            .map(|acc| acc.id)
            .collect()
    }

    fn insert(&mut self, mut account: Account) -> AccountId {
        // Restored or imported lists may carry colliding ids
        if self.records.contains_key(&account.id) {
            account.id = AccountId::new();
        }
        let id = account.id;
        self.order.push(id);
        self.records.insert(id, account);
        id
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Append one account at the end of the list
    pub fn push(&mut self, account: Account) -> AccountId {
        let id = self.insert(account);
        self.bump();
        id
    }

    /// Append a batch of accounts, preserving their relative order
    pub fn extend(&mut self, accounts: Vec<Account>) -> Vec<AccountId> {
        let ids = accounts.into_iter().map(|acc| self.insert(acc)).collect();
        self.bump();
        ids
    }

    /// Update name, issuer and secret of an existing account
    ///
    /// Kind and digits are kept. Returns false if the id is unknown.
    pub fn update(&mut self, id: AccountId, name: String, issuer: String, secret_base32: String) -> bool {
        match self.records.get_mut(&id) {
            Some(account) => {
                account.name = name;
                account.issuer = issuer;
                account.secret_base32 = secret_base32;
                self.bump();
                true
            }
            None => false,
        }
    }

    /// Remove one account
    pub fn remove(&mut self, id: AccountId) -> Option<Account> {
        let removed = self.records.remove(&id)?;
        self.order.retain(|&other| other != id);
        self.bump();
        Some(removed)
    }

    /// Remove every account in `ids`; the remainder keeps its relative order
    pub fn remove_many(&mut self, ids: &HashSet<AccountId>) -> usize {
        let before = self.order.len();
        self.order.retain(|id| !ids.contains(id));
        self.records.retain(|id, _| !ids.contains(id));
        let removed = before - self.order.len();
        if removed > 0 {
            self.bump();
        }
        removed
    }

    /// Replace the canonical order with `new_order`
    ///
    /// The proposal must be a permutation of the current ids.
    pub fn apply_order(&mut self, new_order: Vec<AccountId>) -> Result<(), OrderError> {
        if new_order.len() != self.order.len() {
            return Err(OrderError::LengthMismatch {
                expected: self.order.len(),
                got: new_order.len(),
            });
        }
        let mut seen = HashSet::with_capacity(new_order.len());
        for id in &new_order {
            if !self.records.contains_key(id) {
                return Err(OrderError::UnknownId(*id));
            }
            if !seen.insert(*id) {
                return Err(OrderError::Duplicate(*id));
            }
        }
        if new_order != self.order {
            self.order = new_order;
            self.bump();
        }
        Ok(())
    }

    /// Replace the whole list (restore)
    pub fn replace_all(&mut self, accounts: Vec<Account>) {
        self.records.clear();
        self.order.clear();
        for account in accounts {
            self.insert(account);
        }
        self.bump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> (AccountStore, Vec<AccountId>) {
        let store = AccountStore::from_accounts(vec![
            Account::new("a", "", "AAAA"),
            Account::new("b", "", "BBBB"),
            Account::new("c", "", "CCCC"),
        ]);
        let ids = store.ids().to_vec();
        (store, ids)
    }

    fn names(store: &AccountStore) -> Vec<String> {
        store.iter().map(|a| a.name.clone()).collect()
    }

    #[test]
    fn test_from_accounts_keeps_order() {
        let (store, _) = abc();
        assert_eq!(names(&store), vec!["a", "b", "c"]);
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_push_bumps_generation() {
        let (mut store, _) = abc();
        store.push(Account::new("d", "", "DDDD"));
        assert_eq!(store.generation(), 1);
        assert_eq!(names(&store), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_remove_many_preserves_relative_order() {
        let (mut store, ids) = abc();
        let selected: HashSet<_> = [ids[1]].into_iter().collect();
        assert_eq!(store.remove_many(&selected), 1);
        assert_eq!(names(&store), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_many_empty_selection_is_noop() {
        let (mut store, _) = abc();
        assert_eq!(store.remove_many(&HashSet::new()), 0);
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_apply_order_rejects_non_permutation() {
        let (mut store, ids) = abc();
        let err = store.apply_order(vec![ids[0], ids[1]]).unwrap_err();
        assert_eq!(err, OrderError::LengthMismatch { expected: 3, got: 2 });

        let err = store.apply_order(vec![ids[0], ids[0], ids[1]]).unwrap_err();
        assert_eq!(err, OrderError::Duplicate(ids[0]));

        let stranger = AccountId::new();
        let err = store.apply_order(vec![ids[0], ids[1], stranger]).unwrap_err();
        assert_eq!(err, OrderError::UnknownId(stranger));

        assert_eq!(names(&store), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_apply_order_same_order_keeps_generation() {
        let (mut store, ids) = abc();
        store.apply_order(ids.clone()).unwrap();
        assert_eq!(store.generation(), 0);
        store.apply_order(vec![ids[2], ids[0], ids[1]]).unwrap();
        assert_eq!(store.generation(), 1);
        assert_eq!(names(&store), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_update_keeps_position() {
        let (mut store, ids) = abc();
        assert!(store.update(ids[1], "bee".into(), "Hive".into(), "MFRGG".into()));
        assert_eq!(names(&store), vec!["a", "bee", "c"]);
        assert_eq!(store.get(ids[1]).unwrap().issuer, "Hive");
    }

    #[test]
    fn test_update_unknown_id() {
        let (mut store, _) = abc();
        assert!(!store.update(AccountId::new(), "x".into(), "".into(), "AAAA".into()));
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_insert_reassigns_colliding_ids() {
        let (mut store, ids) = abc();
        let mut dup = Account::new("dup", "", "DDDD");
        dup.id = ids[0];
        let new_id = store.push(dup);
        assert_ne!(new_id, ids[0]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_visible_ids_does_not_mutate() {
        let (mut store, ids) = abc();
        store.search_query = "b".to_string();
        assert_eq!(store.visible_ids(), vec![ids[1]]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_replace_all() {
        let (mut store, ids) = abc();
        store.replace_all(vec![Account::new("z", "", "ZZZZ")]);
        assert_eq!(names(&store), vec!["z"]);
        assert!(!store.contains(ids[0]));
        assert_eq!(store.generation(), 1);
    }
}
