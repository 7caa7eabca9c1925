//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - countdown: 30-second step geometry and the regeneration decision
//! - errors: Collaborator error formatting for display
//! - formatting: Code grouping, truncation, secret masking
//! - gesture: Pointer gesture state machine (tap, swipe-edit, swipe-delete)
//! - import: Migration URI payload extraction
//! - layout: List geometry and mouse hit-testing
//! - reorder: Drag-to-reorder controller over the list view
//! - search: Search matching and placeholder states
//! - validation: Account input normalization and checks

pub mod countdown;
pub mod errors;
pub mod formatting;
pub mod gesture;
pub mod import;
pub mod layout;
pub mod reorder;
pub mod search;
pub mod validation;
