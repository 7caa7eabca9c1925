//! Swipe Action Controller
//!
//! Resolves committed gesture and drop outcomes against the current store.
//! An outcome captured under an older generation, or naming an account that
//! is gone, is dropped and the view rebuilt.

use crate::logic::gesture::{GestureKind, GestureOutcome};
use crate::logic::reorder::DropOutcome;
use crate::App;

impl App {
    pub fn apply_gesture(&mut self, outcome: GestureOutcome) {
        let stale = outcome.generation != self.model.store.generation()
            || !self.model.store.contains(outcome.item);
        if stale {
            if outcome.kind != GestureKind::Cancelled {
                tracing::debug!(item = %outcome.item, "discarding gesture from an older list");
            }
            self.rerender();
            return;
        }

        match outcome.kind {
            GestureKind::Tap => {
                self.copy_code(outcome.item);
            }
            GestureKind::SwipeEdit => self.open_edit_form(outcome.item),
            GestureKind::SwipeDelete => {
                self.request_delete(outcome.item);
            }
            GestureKind::Cancelled => {}
        }
    }

    pub fn apply_drop(&mut self, outcome: DropOutcome) {
        match outcome {
            DropOutcome::Committed(order) => {
                self.commit_reorder(order);
            }
            DropOutcome::Unchanged => {}
            DropOutcome::Stale => {
                tracing::debug!("discarding drop from an older list");
                self.rerender();
            }
        }
    }

    /// Keyboard reorder: move the selected row one place up or down
    ///
    /// Runs through the same drag/drop path as the mouse.
    pub(crate) fn move_selected(&mut self, down: bool) {
        let cursor = self.model.ui.cursor;
        let neighbour = if down {
            cursor.checked_add(1)
        } else {
            cursor.checked_sub(1)
        };
        let (Some(source), Some(target)) = (
            self.model.view.visible_rows().nth(cursor).map(|r| r.id),
            neighbour.and_then(|n| self.model.view.visible_rows().nth(n).map(|r| r.id)),
        ) else {
            return;
        };

        let generation = self.model.store.generation();
        if !self.model.drag.drag_start(&self.model.view, source, (0, 0), generation) {
            return;
        }
        self.model.drag.drag_over(target);
        let outcome = self.model.drag.drop(&mut self.model.view, target, generation);
        self.model.drag.drag_end();

        let committed = matches!(outcome, DropOutcome::Committed(_));
        self.apply_drop(outcome);
        if committed {
            if let Some(n) = neighbour {
                self.model.ui.cursor = n;
            }
        }
    }
}
