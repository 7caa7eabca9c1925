//! Message types for the Elm Architecture pattern
//!
//! Every state change flows through `App::update(Msg)`.
//!
//! Message sources:
//! - User input (keyboard and mouse events)
//! - Refresh scheduler ticks
//! - Service worker responses (persistence, backup, restore)

use crossterm::event::{KeyEvent, MouseEvent};

use crate::services::{ServiceResponse, Tick};

/// Unified message type for all application events
#[derive(Debug)]
pub enum Msg {
    // ============================================
    // USER INPUT
    // ============================================
    /// User pressed a key
    Key(KeyEvent),

    /// Mouse button, drag, or motion over the terminal
    Mouse(MouseEvent),

    // ============================================
    // BACKGROUND
    // ============================================
    /// Refresh scheduler tick
    Tick(Tick),

    /// Response from the service worker
    Service(ServiceResponse),
}
