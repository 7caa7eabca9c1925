//! Mouse Input Handler
//!
//! Translates terminal mouse events on the account list into the two
//! pointer interactions the list supports:
//! - left button: click copies; pressing on one row and dragging onto another
//!   reorders; a horizontal drag that stays on the pressed row swipes
//! - right button: horizontal drag swipes (right edits, left deletes)
//!
//! Columns are scaled by `cell_width_px` so the recognizer thresholds stay in
//! pointer units.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::logic::gesture::{PointerButton, PointerEvent};
use crate::logic::layout::{row_area, row_at};
use crate::logic::reorder::DropOutcome;
use crate::model::AccountId;
use crate::App;

/// Left-button press that may turn into a reorder drag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Press {
    item: AccountId,
    /// Pointer position inside the pressed row
    offset: (u16, u16),
    /// Store generation the row was read under
    generation: u64,
}

/// Mouse state that lives between terminal events
#[derive(Clone, Debug, Default)]
pub struct MouseTracker {
    press: Option<Press>,
    hovered: Option<AccountId>,
}

impl MouseTracker {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Row under the pointer: (visible index, account id)
fn hit(app: &App, column: u16, row: u16) -> Option<(usize, AccountId)> {
    let ui = &app.model.ui;
    let index = row_at(ui.list_area, ui.scroll, app.model.view.visible_count(), column, row)?;
    let id = app.model.view.visible_rows().nth(index)?.id;
    Some((index, id))
}

pub fn handle_mouse(app: &mut App, event: MouseEvent) {
    // Dialogs are keyboard-only
    if app.model.has_modal() {
        return;
    }

    let scale = f64::from(app.config.cell_width_px.max(1));
    let x = f64::from(event.column) * scale;
    let hit = hit(app, event.column, event.row);

    match event.kind {
        MouseEventKind::Down(button) => {
            let Some((index, id)) = hit else {
                return;
            };
            app.model.ui.cursor = index;
            let button = match button {
                MouseButton::Left => PointerButton::Primary,
                MouseButton::Right => PointerButton::Secondary,
                MouseButton::Middle => return,
            };
            if button == PointerButton::Primary {
                let top = row_area(app.model.ui.list_area, app.model.ui.scroll, index)
                    .map(|r| r.y)
                    .unwrap_or(event.row);
                app.mouse.press = Some(Press {
                    item: id,
                    offset: (
                        event.column.saturating_sub(app.model.ui.list_area.x),
                        event.row.saturating_sub(top),
                    ),
                    generation: app.model.store.generation(),
                });
            }
            let width = f64::from(app.model.ui.list_area.width) * scale;
            let generation = app.model.store.generation();
            app.model.gesture.handle(PointerEvent::Down {
                item: id,
                x,
                width,
                button,
                generation,
            });
        }

        MouseEventKind::Drag(MouseButton::Left) => {
            if app.model.drag.is_dragging() {
                update_drag_highlight(app, hit.map(|(_, id)| id));
                return;
            }
            let Some(press) = app.mouse.press else {
                return;
            };
            if press.generation != app.model.store.generation() {
                // The list changed since the press; the pressed row is gone
                app.mouse.clear();
                return;
            }
            match hit {
                Some((_, id)) if id != press.item => {
                    // Leaving the pressed row turns the click into a reorder
                    app.model.gesture.reset();
                    if app
                        .model
                        .drag
                        .drag_start(&app.model.view, press.item, press.offset, press.generation)
                    {
                        tracing::debug!(source = %press.item, "drag started");
                        update_drag_highlight(app, Some(id));
                    }
                }
                Some(_) => {
                    app.model.gesture.handle(PointerEvent::Move {
                        x,
                        secondary_held: false,
                    });
                }
                None => leave(app),
            }
        }

        MouseEventKind::Drag(MouseButton::Right) => {
            if hit.is_none() {
                leave(app);
                return;
            }
            if let Some(outcome) = app.model.gesture.handle(PointerEvent::Move {
                x,
                secondary_held: true,
            }) {
                app.apply_gesture(outcome);
            }
        }

        MouseEventKind::Moved => {
            // Secondary released somewhere we never saw an Up for
            let secondary_open = app
                .model
                .gesture
                .session()
                .is_some_and(|s| s.button == PointerButton::Secondary);
            if secondary_open {
                if let Some(outcome) = app.model.gesture.handle(PointerEvent::Move {
                    x,
                    secondary_held: false,
                }) {
                    app.apply_gesture(outcome);
                }
            } else if hit.is_none() {
                leave(app);
            }
        }

        MouseEventKind::Up(MouseButton::Left) if app.model.drag.is_dragging() => {
            let generation = app.model.store.generation();
            let outcome = match hit {
                Some((_, target)) => app.model.drag.drop(&mut app.model.view, target, generation),
                None => DropOutcome::Unchanged,
            };
            app.model.drag.drag_end();
            app.mouse.clear();
            app.apply_drop(outcome);
        }

        MouseEventKind::Up(_) => {
            app.mouse.press = None;
            if let Some(outcome) = app.model.gesture.handle(PointerEvent::Up { x }) {
                app.apply_gesture(outcome);
            }
        }

        MouseEventKind::ScrollUp => {
            app.model.ui.cursor = app.model.ui.cursor.saturating_sub(1);
        }
        MouseEventKind::ScrollDown => {
            let visible = app.model.view.visible_count();
            if app.model.ui.cursor + 1 < visible {
                app.model.ui.cursor += 1;
            }
        }

        _ => {}
    }
}

/// Move the drop-target mark to the row under the pointer
fn update_drag_highlight(app: &mut App, target: Option<AccountId>) {
    if app.mouse.hovered == target {
        return;
    }
    if let Some(previous) = app.mouse.hovered.take() {
        app.model.drag.drag_leave(previous);
    }
    if let Some(target) = target {
        app.model.drag.drag_over(target);
        app.mouse.hovered = Some(target);
    }
}

/// Pointer left the list: cancel any swipe in progress
fn leave(app: &mut App) {
    app.mouse.press = None;
    if let Some(outcome) = app.model.gesture.handle(PointerEvent::Leave) {
        app.apply_gesture(outcome);
    }
}
