//! Search Input UI
//!
//! Renders the filter box above the list with the query and match count.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Title of the search box for the current state
pub fn search_title(active: bool, query: &str, match_count: usize) -> String {
    if active {
        format!(" Search ({} matches) - Esc to cancel ", match_count)
    } else if !query.is_empty() {
        format!(" Search ({} matches) - Esc to clear ", match_count)
    } else {
        " Search (/) ".to_string()
    }
}

/// Render the search input box
pub fn render_search_input(f: &mut Frame, area: Rect, query: &str, active: bool, match_count: usize) {
    let border_color = if active { Color::Cyan } else { Color::Gray };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(search_title(active, query, match_count))
        .style(Style::default().fg(border_color));

    let input_line = if active {
        Line::from(vec![
            Span::raw("Filter: "),
            Span::raw(query),
            Span::styled(
                "█",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
            ),
        ])
    } else {
        Line::from(Span::styled(format!("Filter: {}", query), Style::default().fg(Color::Gray)))
    };

    f.render_widget(Paragraph::new(vec![input_line]).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_states() {
        assert_eq!(search_title(false, "", 3), " Search (/) ");
        assert!(search_title(true, "git", 1).contains("1 matches"));
        assert!(search_title(false, "git", 2).contains("Esc to clear"));
    }
}
