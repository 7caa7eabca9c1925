// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: splits the screen (title, list, search, legend)
// - render: main orchestration function that coordinates all rendering
// - account_list: account rows with codes, countdown, swipe and drag feedback
// - legend: hotkey legend
// - search: search input box with query and match count
// - dialogs: add / edit / bulk delete / backup dialogs and the confirmation dialog
// - toast: brief pop-up messages

pub mod account_list;
pub mod dialogs;
pub mod layout;
pub mod legend;
pub mod render;
pub mod search;
pub mod toast;

pub use render::render;
