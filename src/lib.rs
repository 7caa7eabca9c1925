//! authtui: terminal OTP account manager
//!
//! Library half of the binary; everything except terminal setup lives here
//! so integration tests can drive the app through `App::update`.

pub mod app;
pub mod config;
pub mod handlers;
pub mod logic;
pub mod messages;
pub mod model;
pub mod services;
pub mod ui;
pub mod utils;

pub use app::{App, AppConfig, Collaborators};
