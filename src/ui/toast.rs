use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Whether a toast message is styled as an error
pub fn is_error_toast(message: &str) -> bool {
    message.starts_with("Error:")
}

/// Render a toast notification near the bottom of `area`
pub fn render_toast(f: &mut Frame, area: Rect, message: &str) {
    let max_width = area.width.min(70);
    let toast_width = (message.width() as u16 + 6).min(max_width);
    let toast_height = 3;

    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(toast_width) / 2,
        y: area.y + area.height.saturating_sub(toast_height + 4),
        width: toast_width,
        height: toast_height.min(area.height),
    };

    f.render_widget(Clear, toast_area);

    let (icon, color) = if is_error_toast(message) {
        ("✗ ", Color::Red)
    } else {
        ("✓ ", Color::Green)
    };

    let line = Line::from(vec![
        Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(message),
    ]);

    let toast = Paragraph::new(vec![line])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(toast, toast_area);
}
