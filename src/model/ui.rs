//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! preferences, dialogs, the confirmation gate, and visual feedback.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use super::account::AccountId;
use super::confirm::ConfirmGate;
use super::types::Modal;

/// How long a toast stays on screen
pub const TOAST_TTL: Duration = Duration::from_millis(1500);

/// How long a copied row stays highlighted
pub const COPIED_FLASH: Duration = Duration::from_secs(1);

/// UI preferences and popups
#[derive(Clone, Debug)]
pub struct UiModel {
    // ============================================
    // PREFERENCES
    // ============================================
    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    /// First `g` of a `gg` seen
    pub vim_pending_g: bool,

    // ============================================
    // DIALOGS & POPUPS
    // ============================================
    /// Add / edit / bulk delete / backup dialog
    pub modal: Option<Modal>,

    /// Confirmation gate (stacks above `modal`)
    pub confirm: ConfirmGate,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    // ============================================
    // SEARCH
    // ============================================
    /// Whether search input is active (receiving keystrokes)
    pub search_mode: bool,

    // ============================================
    // LIST STATE
    // ============================================
    /// Selected row among the visible rows
    pub cursor: usize,

    /// First visible row rendered
    pub scroll: usize,

    /// Inner list area from the last frame (mouse hit-testing)
    pub list_area: Rect,

    /// Row whose code was just copied
    pub copied: Option<(AccountId, Instant)>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            vim_mode,
            vim_pending_g: false,
            modal: None,
            confirm: ConfirmGate::new(),
            toast_message: None,
            search_mode: false,
            cursor: 0,
            scroll: 0,
            list_area: Rect::default(),
            copied: None,
            should_quit: false,
        }
    }

    /// Check if any dialog is showing (search input is not a dialog)
    pub fn has_modal(&self) -> bool {
        self.modal.is_some() || self.confirm.is_open()
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some((message.into(), Instant::now()));
    }

    pub fn should_dismiss_toast(&self, now: Instant) -> bool {
        self.toast_message
            .as_ref()
            .is_some_and(|(_, shown)| now.saturating_duration_since(*shown) >= TOAST_TTL)
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }

    pub fn mark_copied(&mut self, id: AccountId) {
        self.copied = Some((id, Instant::now()));
    }

    /// Whether `id` is still inside its copied flash
    pub fn is_copied(&self, id: AccountId, now: Instant) -> bool {
        self.copied
            .is_some_and(|(copied, at)| copied == id && now.saturating_duration_since(at) < COPIED_FLASH)
    }

    /// Clear expired transient feedback (toast, copied flash, dialog status lines)
    pub fn expire(&mut self, now: Instant) {
        if self.should_dismiss_toast(now) {
            self.dismiss_toast();
        }
        if let Some((id, _)) = self.copied {
            if !self.is_copied(id, now) {
                self.copied = None;
            }
        }
        match self.modal.as_mut() {
            Some(Modal::Add(form)) => super::types::expire_status(&mut form.status, now),
            Some(Modal::Edit(dialog)) => super::types::expire_status(&mut dialog.status, now),
            Some(Modal::Backup(form)) => super::types::expire_status(&mut form.status, now),
            Some(Modal::BulkDelete(_)) | None => {}
        }
    }

    /// Clamp the cursor after the number of visible rows changed
    pub fn clamp_cursor(&mut self, visible: usize) {
        if visible == 0 {
            self.cursor = 0;
            self.scroll = 0;
        } else if self.cursor >= visible {
            self.cursor = visible - 1;
        }
    }
}
