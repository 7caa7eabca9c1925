//! Rendering the main screen and dialogs into a test backend
//!
//! Scenario: draw frames for a populated list, an empty list, a search with
//! no results and an open confirmation, and check the text that reaches the
//! screen. Rendering also records the list area used for mouse hit-testing.

mod common;

use authtui::model::Account;
use authtui::ui;
use authtui::App;
use common::*;
use crossterm::event::KeyCode;
use ratatui::{backend::TestBackend, Terminal};

fn draw(app: &mut App) -> String {
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui::render(f, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[tokio::test]
async fn test_list_shows_accounts_and_codes() {
    let mut h = harness(vec![
        Account::new("alice", "GitHub", SECRET),
        Account::new("bob", "", SECRET),
    ]);

    let screen = draw(&mut h.app);

    assert!(screen.contains("Accounts (2)"));
    assert!(screen.contains("GitHub"));
    assert!(screen.contains("alice"));
    assert!(screen.contains("bob"));
    let code = h.app.model.view.code(h.app.model.store.ids()[0]).text();
    assert!(screen.contains(&code));
    assert!(screen.contains("30s"));

    // Inner area of the bordered list, below the title bar
    let area = h.app.model.ui.list_area;
    assert_eq!((area.x, area.y, area.width), (1, 2, 78));
}

#[tokio::test]
async fn test_empty_state() {
    let mut h = harness(vec![]);
    let screen = draw(&mut h.app);
    assert!(screen.contains("No accounts yet"));
}

#[tokio::test]
async fn test_no_results_state() {
    let mut h = harness(accounts(&["a", "b"]));
    h.app.update(key(KeyCode::Char('/')));
    type_text(&mut h.app, "zzz");

    let screen = draw(&mut h.app);
    assert!(screen.contains("No results"));
    assert!(screen.contains("0 matches"));
}

#[tokio::test]
async fn test_confirmation_drawn_over_list() {
    let mut h = harness(accounts(&["a"]));
    h.app.update(key(KeyCode::Char('d')));

    let screen = draw(&mut h.app);
    assert!(screen.contains("Delete Account"));
    assert!(screen.contains("Delete (y)"));
}

#[tokio::test]
async fn test_dialogs_render() {
    let mut h = harness(accounts(&["a"]));

    h.app.update(key(KeyCode::Char('a')));
    assert!(draw(&mut h.app).contains("Add Account"));
    h.app.update(key(KeyCode::Esc));

    h.app.update(key(KeyCode::Char('D')));
    assert!(draw(&mut h.app).contains("Select all"));
    h.app.update(key(KeyCode::Esc));

    h.app.update(key(KeyCode::Char('b')));
    assert!(draw(&mut h.app).contains("Password"));
}
