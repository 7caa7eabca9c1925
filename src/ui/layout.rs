use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout information for rendering
pub struct LayoutInfo {
    /// Title bar with the countdown
    pub title_area: Rect,
    /// Account list, including its border
    pub list_area: Rect,
    /// Search input area (if visible)
    pub search_area: Option<Rect>,
    /// Hotkey legend area
    pub legend_area: Rect,
}

/// Split the terminal: title, list, optional search box, legend
pub fn calculate_layout(terminal_size: Rect, legend_height: u16, search_visible: bool) -> LayoutInfo {
    let search_height = if search_visible { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(search_height),
            Constraint::Length(legend_height),
        ])
        .split(terminal_size);

    LayoutInfo {
        title_area: chunks[0],
        list_area: chunks[1],
        search_area: search_visible.then_some(chunks[2]),
        legend_area: chunks[3],
    }
}
