//! Event Handlers
//!
//! - keyboard: user keyboard input
//! - mouse: pointer input on the account list (tap, swipe, drag)
//! - service: results from the background service worker
//!
//! Handlers are free functions taking `&mut App`.

pub mod keyboard;
pub mod mouse;
pub mod service;

pub use keyboard::handle_key;
pub use mouse::{handle_mouse, MouseTracker};
pub use service::handle_service_response;
