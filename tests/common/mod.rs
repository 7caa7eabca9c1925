//! Shared setup for the integration tests: an app over in-memory SQLite,
//! a manual clock and `cat` as the clipboard command.

#![allow(dead_code)]

use std::sync::Arc;

use authtui::messages::Msg;
use authtui::model::{Account, GitSettings};
use authtui::services::backup::{BackupCrypto, RemoteBackup, Unconfigured};
use authtui::services::migration::{MigrationDecoder, Unsupported};
use authtui::services::otp::Totp;
use authtui::services::{AccountDb, ManualClock, Services};
use authtui::{App, AppConfig, Collaborators};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

pub const SECRET: &str = "JBSWY3DPEHPK3PXP";

/// Start of a 30 s step
pub const START_SECS: f64 = 1_000_020.0;

pub struct Harness {
    pub app: App,
    pub db: Arc<AccountDb>,
    pub clock: ManualClock,
}

pub struct Setup {
    pub crypto: Arc<dyn BackupCrypto>,
    pub remote: Arc<dyn RemoteBackup>,
    pub decoder: Arc<dyn MigrationDecoder>,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            crypto: Arc::new(Unconfigured),
            remote: Arc::new(Unconfigured),
            decoder: Arc::new(Unsupported),
        }
    }
}

pub fn accounts(names: &[&str]) -> Vec<Account> {
    names.iter().map(|name| Account::new(*name, "", SECRET)).collect()
}

/// Must be called inside a tokio runtime (the app spawns its worker)
pub fn harness(accounts: Vec<Account>) -> Harness {
    harness_with(accounts, Setup::default())
}

pub fn harness_with(accounts: Vec<Account>, setup: Setup) -> Harness {
    let db = Arc::new(AccountDb::new_in_memory().expect("in-memory db"));
    let clock = ManualClock::at(START_SECS);
    let collaborators = Collaborators {
        services: Services {
            persistence: db.clone(),
            crypto: setup.crypto,
            remote: setup.remote,
        },
        engine: Arc::new(Totp),
        decoder: setup.decoder,
        clock: Arc::new(clock.clone()),
    };
    let config = AppConfig {
        clipboard_command: Some("cat".to_string()),
        ..AppConfig::default()
    };

    let mut app = App::new(accounts, GitSettings::default(), config, collaborators);
    // What the first frame would record: 80 columns, 10 rows of two lines
    app.model.ui.list_area = Rect::new(0, 0, 80, 20);
    Harness { app, db, clock }
}

/// Account names in canonical order
pub fn names(app: &App) -> Vec<String> {
    app.model.store.iter().map(|a| a.name.clone()).collect()
}

pub fn key(code: KeyCode) -> Msg {
    Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn key_with(code: KeyCode, modifiers: KeyModifiers) -> Msg {
    Msg::Key(KeyEvent::new(code, modifiers))
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.update(key(KeyCode::Char(c)));
    }
}

pub fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Msg {
    Msg::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Screen row of the first line of visible row `index`
pub fn row_y(index: u16) -> u16 {
    index * 2
}

pub fn left_drag(app: &mut App, from: u16, to: u16) {
    app.update(mouse(MouseEventKind::Down(MouseButton::Left), 10, row_y(from)));
    app.update(mouse(MouseEventKind::Drag(MouseButton::Left), 10, row_y(to)));
    app.update(mouse(MouseEventKind::Up(MouseButton::Left), 10, row_y(to)));
}

pub fn right_swipe(app: &mut App, row: u16, from_col: u16, to_col: u16) {
    app.update(mouse(MouseEventKind::Down(MouseButton::Right), from_col, row_y(row)));
    app.update(mouse(MouseEventKind::Drag(MouseButton::Right), to_col, row_y(row)));
    app.update(mouse(MouseEventKind::Up(MouseButton::Right), to_col, row_y(row)));
}
