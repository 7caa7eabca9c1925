//! Keyboard Input Handler
//!
//! Handles all keyboard input and user interactions. Dispatch order follows
//! what is on top: confirmation gate, then the open dialog, then the search
//! box, then the account list.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::logic::layout::rows_that_fit;
use crate::model::{AddForm, AddTab, DeleteSelection, EditStage, Modal};
use crate::App;

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Handle confirmation prompt first
    if app.model.ui.confirm.is_open() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.accept_confirmation(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_confirmation(),
            // Ignore other keys while prompt is showing
            _ => {}
        }
        return;
    }

    match app.model.ui.modal {
        Some(Modal::Add(_)) => return handle_add_key(app, key),
        Some(Modal::Edit(_)) => return handle_edit_key(app, key),
        Some(Modal::BulkDelete(_)) => return handle_bulk_delete_key(app, key),
        Some(Modal::Backup(_)) => return handle_backup_key(app, key),
        None => {}
    }

    if app.model.ui.search_mode {
        return handle_search_key(app, key);
    }

    handle_list_key(app, key);
}

/// Type into a text field; true if it changed
fn edit_text(field: &mut String, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            field.push(c);
            true
        }
        KeyCode::Backspace => field.pop().is_some(),
        _ => false,
    }
}

/// Tab / Shift-Tab focus cycling
fn cycle_focus(focus: &mut usize, count: usize, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            *focus = (*focus + 1) % count;
            true
        }
        KeyCode::BackTab | KeyCode::Up => {
            *focus = (*focus + count - 1) % count;
            true
        }
        _ => false,
    }
}

fn handle_add_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.model.ui.modal = None,
        KeyCode::Enter => app.submit_add_form(),
        _ => {
            let Some(Modal::Add(form)) = app.model.ui.modal.as_mut() else {
                return;
            };
            if key.code == KeyCode::Char('t') && key.modifiers.contains(KeyModifiers::CONTROL) {
                form.tab = match form.tab {
                    AddTab::Manual => AddTab::Import,
                    AddTab::Import => AddTab::Manual,
                };
                form.focus = 0;
                return;
            }
            let count = form.field_count();
            if !cycle_focus(&mut form.focus, count, &key) {
                edit_text(form.focused_field(), &key);
            }
        }
    }
}

fn handle_edit_key(app: &mut App, key: KeyEvent) {
    let total = app.model.store.len();
    let Some(Modal::Edit(dialog)) = app.model.ui.modal.as_mut() else {
        return;
    };

    match &mut dialog.stage {
        EditStage::Picking { cursor } => match key.code {
            KeyCode::Esc => app.model.ui.modal = None,
            KeyCode::Up | KeyCode::Char('k') => *cursor = cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if *cursor + 1 < total {
                    *cursor += 1;
                }
            }
            KeyCode::Enter => {
                let picked = app.model.store.ids().get(*cursor).copied();
                if let Some(id) = picked {
                    app.open_edit_form(id);
                }
            }
            _ => {}
        },
        EditStage::Editing(form) => match key.code {
            KeyCode::Esc => app.model.ui.modal = None,
            KeyCode::Enter => app.submit_edit_form(),
            _ => {
                if !cycle_focus(&mut form.focus, 3, &key) {
                    edit_text(form.focused_field(), &key);
                }
            }
        },
    }
}

fn handle_bulk_delete_key(app: &mut App, key: KeyEvent) {
    let ids = app.model.store.ids().to_vec();
    let Some(Modal::BulkDelete(selection)) = app.model.ui.modal.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Esc => app.model.ui.modal = None,
        KeyCode::Up | KeyCode::Char('k') => selection.cursor = selection.cursor.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => {
            if selection.cursor + 1 < ids.len() {
                selection.cursor += 1;
            }
        }
        KeyCode::Char(' ') => {
            if let Some(&id) = ids.get(selection.cursor) {
                selection.toggle(id);
            }
        }
        KeyCode::Char('a') => selection.toggle_all(&ids),
        KeyCode::Enter | KeyCode::Char('d') => {
            app.request_bulk_delete();
        }
        _ => {}
    }
}

fn handle_backup_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.model.ui.modal = None,
        KeyCode::Enter => {
            app.request_backup();
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.request_restore();
        }
        _ => {
            let Some(Modal::Backup(form)) = app.model.ui.modal.as_mut() else {
                return;
            };
            if cycle_focus(&mut form.focus, 3, &key) {
                return;
            }
            let persisted = form.focus_is_persisted_setting();
            if edit_text(form.focused_field(), &key) && persisted {
                app.autosave_git_settings();
            }
        }
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.model.ui.search_mode = false;
            app.model.set_search(String::new());
        }
        KeyCode::Enter => app.model.ui.search_mode = false,
        KeyCode::Up => move_cursor(app, -1),
        KeyCode::Down => move_cursor(app, 1),
        _ => {
            let mut query = app.model.store.search_query.clone();
            if edit_text(&mut query, &key) {
                app.model.set_search(query);
            }
        }
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let visible = app.model.view.visible_count();
    if visible == 0 {
        return;
    }
    let next = (app.model.ui.cursor as isize + delta).clamp(0, visible as isize - 1);
    app.model.ui.cursor = next as usize;
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    let vim = app.model.ui.vim_mode;
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let page = rows_that_fit(app.model.ui.list_area.height).max(1) as isize;

    // Vim 'gg' needs two presses
    let pending_g = std::mem::take(&mut app.model.ui.vim_pending_g);

    match key.code {
        KeyCode::Char('q') => app.model.ui.should_quit = true,
        KeyCode::Char('c') if ctrl => app.model.ui.should_quit = true,

        // Reorder
        KeyCode::Up if shift => app.move_selected(false),
        KeyCode::Down if shift => app.move_selected(true),
        KeyCode::Char('K') => app.move_selected(false),
        KeyCode::Char('J') => app.move_selected(true),

        // Navigation
        KeyCode::Up => move_cursor(app, -1),
        KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') if vim => move_cursor(app, -1),
        KeyCode::Char('j') if vim => move_cursor(app, 1),
        KeyCode::Char('u') if vim && ctrl => move_cursor(app, -(page / 2).max(1)),
        KeyCode::Char('d') if vim && ctrl => move_cursor(app, (page / 2).max(1)),
        KeyCode::PageUp => move_cursor(app, -page),
        KeyCode::PageDown => move_cursor(app, page),
        KeyCode::Home => app.model.ui.cursor = 0,
        KeyCode::End => move_cursor(app, isize::MAX / 2),
        KeyCode::Char('g') if vim => {
            if pending_g {
                app.model.ui.cursor = 0;
            } else {
                app.model.ui.vim_pending_g = true;
            }
        }
        KeyCode::Char('G') if vim => move_cursor(app, isize::MAX / 2),

        // Search
        KeyCode::Char('/') => app.model.ui.search_mode = true,
        KeyCode::Esc => {
            if !app.model.store.search_query.is_empty() {
                app.model.set_search(String::new());
            }
        }

        // Actions on the selected account
        KeyCode::Enter | KeyCode::Char('c') => {
            if let Some(id) = app.model.selected_account().map(|a| a.id) {
                app.copy_code(id);
            }
        }
        KeyCode::Char('e') => {
            if let Some(id) = app.model.selected_account().map(|a| a.id) {
                app.open_edit_form(id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.model.selected_account().map(|a| a.id) {
                app.request_delete(id);
            }
        }

        // Dialogs
        KeyCode::Char('a') => app.model.ui.modal = Some(Modal::Add(AddForm::new())),
        KeyCode::Char('E') => app.open_edit_picker(),
        KeyCode::Char('D') => app.model.ui.modal = Some(Modal::BulkDelete(DeleteSelection::default())),
        KeyCode::Char('b') => app.open_backup_dialog(),

        _ => {}
    }
}
