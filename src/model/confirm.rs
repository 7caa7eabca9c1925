//! Confirmation Workflow
//!
//! Single-slot gate in front of destructive or overwriting operations.
//! The deferred commit is carried as a `ConfirmAction` value; accepting hands
//! it out exactly once.

use ratatui::style::Color;

use super::account::AccountId;

/// Colour used when a request does not name an accent
pub const DANGER: Color = Color::Rgb(0xef, 0x44, 0x44);

/// Deferred operation committed by accepting a confirmation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Delete one account (swipe-to-delete)
    DeleteAccount { id: AccountId },
    /// Delete every selected account (bulk delete)
    DeleteAccounts { ids: Vec<AccountId> },
    /// Encrypt and upload the list
    Backup {
        token: String,
        gist_id: String,
        password: String,
    },
    /// Download, decrypt and replace the list
    Restore {
        token: String,
        gist_id: String,
        password: String,
    },
}

/// Icon shown in the dialog header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmIcon {
    Help,
    CloudUpload,
    CloudDownload,
}

impl ConfirmIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            ConfirmIcon::Help => "?",
            ConfirmIcon::CloudUpload => "⇪",
            ConfirmIcon::CloudDownload => "⇩",
        }
    }
}

/// An open confirmation dialog
#[derive(Clone, Debug, PartialEq)]
pub struct PendingConfirmation {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub accent: Option<Color>,
    pub icon: Option<ConfirmIcon>,
    pub action: ConfirmAction,
}

impl PendingConfirmation {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        confirm_label: impl Into<String>,
        action: ConfirmAction,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: confirm_label.into(),
            accent: None,
            icon: None,
            action,
        }
    }

    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = Some(accent);
        self
    }

    pub fn with_icon(mut self, icon: ConfirmIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Accent as drawn: danger red unless the request set one
    pub fn accent_color(&self) -> Color {
        self.accent.unwrap_or(DANGER)
    }

    /// Icon as drawn: a custom icon is only honored together with a custom accent
    pub fn icon_glyph(&self) -> &'static str {
        match (self.accent, self.icon) {
            (Some(_), Some(icon)) => icon.glyph(),
            _ => ConfirmIcon::Help.glyph(),
        }
    }
}

/// Holds at most one pending confirmation
#[derive(Clone, Debug, Default)]
pub struct ConfirmGate {
    pending: Option<PendingConfirmation>,
}

impl ConfirmGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a dialog; refused (returns false) while another one is open
    pub fn open(&mut self, request: PendingConfirmation) -> bool {
        if self.pending.is_some() {
            tracing::warn!(title = %request.title, "confirmation already open, request dropped");
            return false;
        }
        self.pending = Some(request);
        true
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    /// Accept: closes the dialog and yields its action exactly once
    pub fn accept(&mut self) -> Option<ConfirmAction> {
        self.pending.take().map(|p| p.action)
    }

    /// Cancel (button, Esc or backdrop): closes without yielding anything
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
