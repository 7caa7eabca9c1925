//! Canonical mutations through the application controller
//!
//! Scenario: add, import, edit and delete each validate, mutate the store,
//! queue a save of the full list and re-render. Invalid input never reaches
//! the store and is reported inline in the dialog.

mod common;

use std::collections::HashSet;

use anyhow::Result;
use authtui::logic::validation::ValidationError;
use authtui::model::{Account, AccountId, Modal};
use authtui::services::migration::MigrationDecoder;
use authtui::services::Persistence;
use common::*;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::Arc;

/// Payload is `name:secret` per line
struct LineDecoder;

impl MigrationDecoder for LineDecoder {
    fn parse_payload(&self, bytes: &[u8]) -> Result<Vec<Account>> {
        let text = std::str::from_utf8(bytes)?;
        Ok(text
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(name, secret)| Account::new(name, "", secret))
            .collect())
    }
}

#[tokio::test]
async fn test_add_validates_and_persists() {
    let mut h = harness(accounts(&["a"]));

    let id = h.app.add_account("  bob ", "GitHub", "jbsw y3dp").unwrap();
    let added = h.app.model.store.get(id).unwrap();
    assert_eq!(added.name, "bob");
    assert_eq!(added.secret_base32, "JBSWY3DP");
    assert_eq!(h.app.model.view.visible_count(), 2);

    assert!(h.app.process_next_service_response().await);
    let saved = h.db.load_accounts().await.unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[1].id, id);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_store() {
    let mut h = harness(accounts(&["a"]));

    assert_eq!(h.app.add_account("bob", "", "ABC1"), Err(ValidationError::InvalidSecret));
    assert!(h.app.add_account("", "", SECRET).is_err());
    assert!(h.app.add_account("bob", "", "   ").is_err());
    assert_eq!(names(&h.app), vec!["a"]);
}

#[tokio::test]
async fn test_add_form_reports_inline() {
    let mut h = harness(vec![]);

    h.app.update(key(KeyCode::Char('a')));
    type_text(&mut h.app, "bob");
    h.app.update(key(KeyCode::Tab));
    h.app.update(key(KeyCode::Tab));
    type_text(&mut h.app, "abc1");
    h.app.update(key(KeyCode::Enter));

    match &h.app.model.ui.modal {
        Some(Modal::Add(form)) => {
            assert_eq!(form.status.as_ref().map(|s| s.text.as_str()), Some("Invalid Secret Key"));
        }
        other => panic!("expected add dialog, got {:?}", other),
    }
    assert!(h.app.model.store.is_empty());

    // Fix the secret and submit again
    for _ in 0..4 {
        h.app.update(key(KeyCode::Backspace));
    }
    type_text(&mut h.app, "abcd");
    h.app.update(key(KeyCode::Enter));
    assert!(h.app.model.ui.modal.is_none());
    assert_eq!(names(&h.app), vec!["bob"]);
}

#[tokio::test]
async fn test_import_appends_accounts() {
    let mut h = harness_with(
        accounts(&["a"]),
        Setup {
            decoder: Arc::new(LineDecoder),
            ..Setup::default()
        },
    );

    // base64 of "x:AAAA\ny:BBBB"
    let uri = "otpauth-migration://offline?data=eDpBQUFBCnk6QkJCQg%3D%3D";
    assert_eq!(h.app.import_migration(uri).unwrap(), 2);
    assert_eq!(names(&h.app), vec!["a", "x", "y"]);
}

#[tokio::test]
async fn test_import_errors_surface_in_form() {
    let mut h = harness(vec![]);

    h.app.update(key(KeyCode::Char('a')));
    h.app.update(key_with(KeyCode::Char('t'), KeyModifiers::CONTROL));
    type_text(&mut h.app, "https://example.com");
    h.app.update(key(KeyCode::Enter));

    match &h.app.model.ui.modal {
        Some(Modal::Add(form)) => assert_eq!(
            form.status.as_ref().map(|s| s.text.as_str()),
            Some("Invalid Google Authenticator URI")
        ),
        other => panic!("expected add dialog, got {:?}", other),
    }

    // Default decoder has no payload parser
    let err = h
        .app
        .import_migration("otpauth-migration://offline?data=eDpBQUFB")
        .unwrap_err();
    assert_eq!(err.to_string(), "Migration import is not configured");
}

#[tokio::test]
async fn test_edit_updates_in_place() {
    let mut h = harness(accounts(&["a", "b"]));
    let b = h.app.model.store.ids()[1];

    assert_eq!(h.app.edit_account(b, "bee", "Hive", "MZXW6==="), Ok(true));
    let edited = h.app.model.store.get(b).unwrap();
    assert_eq!(edited.display_name(), "Hive");
    assert_eq!(edited.secondary_name(), Some("bee"));
    assert_eq!(names(&h.app), vec!["a", "bee"]);

    assert_eq!(h.app.edit_account(AccountId::new(), "x", "", SECRET), Ok(false));
    assert!(h.app.edit_account(b, "", "", SECRET).is_err());
}

#[tokio::test]
async fn test_edit_picker_then_form() {
    let mut h = harness(accounts(&["a", "b"]));

    h.app.update(key(KeyCode::Char('E')));
    h.app.update(key(KeyCode::Down));
    h.app.update(key(KeyCode::Enter));
    type_text(&mut h.app, "2");
    h.app.update(key(KeyCode::Enter));

    assert!(h.app.model.ui.modal.is_none());
    assert_eq!(names(&h.app), vec!["a", "b2"]);
}

#[tokio::test]
async fn test_bulk_delete_keeps_relative_order() {
    let mut h = harness(accounts(&["a", "b", "c"]));
    let b = h.app.model.store.ids()[1];

    let removed = h.app.delete_accounts(&HashSet::from([b, AccountId::new()]));
    assert_eq!(removed, 1);
    assert_eq!(names(&h.app), vec!["a", "c"]);

    assert!(h.app.process_next_service_response().await);
    let saved: Vec<String> = h.db.load_accounts().await.unwrap().into_iter().map(|a| a.name).collect();
    assert_eq!(saved, vec!["a", "c"]);
}

#[tokio::test]
async fn test_search_filters_without_reordering() {
    let mut h = harness(vec![
        Account::new("alice", "GitHub", SECRET),
        Account::new("bob", "GitLab", SECRET),
        Account::new("carol", "Google", SECRET),
    ]);

    h.app.update(key(KeyCode::Char('/')));
    type_text(&mut h.app, "git");
    assert_eq!(h.app.model.view.visible_count(), 2);
    assert_eq!(h.app.model.selected_account().unwrap().name, "alice");

    h.app.update(key(KeyCode::Enter));
    assert!(!h.app.model.ui.search_mode);
    assert_eq!(h.app.model.store.search_query, "git");

    h.app.update(key(KeyCode::Esc));
    assert_eq!(h.app.model.view.visible_count(), 3);
    assert_eq!(names(&h.app), vec!["alice", "bob", "carol"]);
}
