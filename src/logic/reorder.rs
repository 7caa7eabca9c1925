//! Drag-to-reorder
//!
//! Drop moves the source row in the visual sequence first, then the new
//! canonical order is read back from that sequence. The read-back is the
//! only thing ever committed, so consecutive drags cannot compound index
//! arithmetic errors.

use crate::model::{AccountId, ListView};

/// An in-progress drag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragSession {
    pub source: AccountId,
    /// Index of the source in the visual sequence when the drag started
    pub source_index: usize,
    /// Pointer position inside the source row (column, row); anchors the preview
    pub preview_offset: (u16, u16),
    /// Row currently under the pointer
    pub highlighted: Option<AccountId>,
    /// Store generation at drag start
    pub generation: u64,
}

/// Result of a drop
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// Visual sequence changed; this is the read-back order to commit
    Committed(Vec<AccountId>),
    /// Nothing to do (no drag, dropped onto itself, or unknown target)
    Unchanged,
    /// The list changed underneath the drag; the caller must rebuild the view
    Stale,
}

#[derive(Clone, Debug, Default)]
pub struct ReorderController {
    session: Option<DragSession>,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Source row being dragged, for the "dragging" mark
    pub fn dragging(&self) -> Option<AccountId> {
        self.session.map(|s| s.source)
    }

    /// Row marked as drop target, for the "drag-over" mark
    pub fn highlighted(&self) -> Option<AccountId> {
        self.session.and_then(|s| s.highlighted)
    }

    /// Begin dragging `source`; ignored if it is not in the view or a drag is open
    pub fn drag_start(
        &mut self,
        view: &ListView,
        source: AccountId,
        preview_offset: (u16, u16),
        generation: u64,
    ) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(source_index) = view.position_of(source) else {
            return false;
        };
        self.session = Some(DragSession {
            source,
            source_index,
            preview_offset,
            highlighted: None,
            generation,
        });
        true
    }

    pub fn drag_over(&mut self, target: AccountId) {
        if let Some(session) = self.session.as_mut() {
            session.highlighted = Some(target);
        }
    }

    pub fn drag_leave(&mut self, target: AccountId) {
        if let Some(session) = self.session.as_mut() {
            if session.highlighted == Some(target) {
                session.highlighted = None;
            }
        }
    }

    /// Drop onto `target`, moving the source in `view` and reading the order back
    ///
    /// `current_generation` is the store generation at drop time; a mismatch
    /// with the drag's captured generation means the list changed mid-drag.
    pub fn drop(&mut self, view: &mut ListView, target: AccountId, current_generation: u64) -> DropOutcome {
        let Some(session) = self.session.take() else {
            return DropOutcome::Unchanged;
        };

        if session.generation != current_generation || view.generation != current_generation {
            return DropOutcome::Stale;
        }
        if session.source == target {
            return DropOutcome::Unchanged;
        }
        let Some(target_index) = view.position_of(target) else {
            return DropOutcome::Unchanged;
        };

        let moved = if session.source_index < target_index {
            view.move_after(session.source, target)
        } else {
            view.move_before(session.source, target)
        };
        if !moved {
            return DropOutcome::Stale;
        }

        view.restamp();
        DropOutcome::Committed(view.read_back())
    }

    /// End of drag, with or without a drop: clears preview and all marks
    pub fn drag_end(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Account, AccountStore};

    fn abcd() -> (AccountStore, ListView, Vec<AccountId>) {
        let store = AccountStore::from_accounts(
            ["A", "B", "C", "D"]
                .iter()
                .map(|n| Account::new(*n, "", "AAAA"))
                .collect(),
        );
        let view = ListView::derive(&store);
        let ids = store.ids().to_vec();
        (store, view, ids)
    }

    #[test]
    fn test_drop_forward_lands_after_target() {
        let (store, mut view, ids) = abcd();
        let mut ctl = ReorderController::new();
        assert!(ctl.drag_start(&view, ids[0], (3, 0), store.generation()));
        let out = ctl.drop(&mut view, ids[2], store.generation());
        assert_eq!(out, DropOutcome::Committed(vec![ids[1], ids[2], ids[0], ids[3]]));
    }

    #[test]
    fn test_drop_backward_lands_before_target() {
        let (store, mut view, ids) = abcd();
        let mut ctl = ReorderController::new();
        ctl.drag_start(&view, ids[3], (0, 0), store.generation());
        let out = ctl.drop(&mut view, ids[1], store.generation());
        assert_eq!(out, DropOutcome::Committed(vec![ids[0], ids[3], ids[1], ids[2]]));
    }

    #[test]
    fn test_drop_restamps_positions() {
        let (store, mut view, ids) = abcd();
        let mut ctl = ReorderController::new();
        ctl.drag_start(&view, ids[0], (0, 0), store.generation());
        ctl.drop(&mut view, ids[3], store.generation());
        let positions: Vec<usize> = view.rows().iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
        assert_eq!(view.rows()[3].id, ids[0]);
    }

    #[test]
    fn test_drop_on_self_unchanged() {
        let (store, mut view, ids) = abcd();
        let mut ctl = ReorderController::new();
        ctl.drag_start(&view, ids[1], (0, 0), store.generation());
        assert_eq!(ctl.drop(&mut view, ids[1], store.generation()), DropOutcome::Unchanged);
        assert_eq!(view.read_back(), ids);
    }

    #[test]
    fn test_drop_after_generation_change_is_stale() {
        let (mut store, mut view, ids) = abcd();
        let mut ctl = ReorderController::new();
        ctl.drag_start(&view, ids[0], (0, 0), store.generation());
        store.remove(ids[3]);
        assert_eq!(ctl.drop(&mut view, ids[2], store.generation()), DropOutcome::Stale);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_highlight_lifecycle() {
        let (store, view, ids) = abcd();
        let mut ctl = ReorderController::new();
        ctl.drag_over(ids[1]);
        assert!(ctl.highlighted().is_none());

        ctl.drag_start(&view, ids[0], (0, 0), store.generation());
        ctl.drag_over(ids[1]);
        assert_eq!(ctl.highlighted(), Some(ids[1]));
        ctl.drag_leave(ids[2]);
        assert_eq!(ctl.highlighted(), Some(ids[1]));
        ctl.drag_leave(ids[1]);
        assert!(ctl.highlighted().is_none());

        ctl.drag_over(ids[2]);
        ctl.drag_end();
        assert!(ctl.highlighted().is_none());
        assert!(ctl.dragging().is_none());
    }

    #[test]
    fn test_successive_drags_use_read_back() {
        let (mut store, mut view, ids) = abcd();
        let mut ctl = ReorderController::new();

        ctl.drag_start(&view, ids[0], (0, 0), store.generation());
        if let DropOutcome::Committed(order) = ctl.drop(&mut view, ids[3], store.generation()) {
            store.apply_order(order).unwrap();
            view.generation = store.generation();
        }
        ctl.drag_end();

        ctl.drag_start(&view, ids[3], (0, 0), store.generation());
        if let DropOutcome::Committed(order) = ctl.drop(&mut view, ids[1], store.generation()) {
            store.apply_order(order).unwrap();
        }
        ctl.drag_end();

        // [A,B,C,D] -> [B,C,D,A] -> [D,B,C,A]
        assert_eq!(store.ids(), &[ids[3], ids[1], ids[2], ids[0]]);
    }
}
