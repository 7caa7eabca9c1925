use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key(k: &'static str) -> Span<'static> {
    Span::styled(k, Style::default().fg(Color::Yellow))
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(vim_mode: bool, search_mode: bool, has_search_query: bool, has_accounts: bool) -> Vec<Span<'static>> {
    let mut spans = vec![];

    if search_mode {
        spans.extend([
            key("Enter"),
            Span::raw(":Accept  "),
            key("Esc"),
            Span::raw(":Exit Search"),
        ]);
        return spans;
    }

    if vim_mode {
        spans.extend([key("jk"), Span::raw(":Nav  "), key("gg/G"), Span::raw(":First/Last  ")]);
    } else {
        spans.extend([key("↑/↓"), Span::raw(":Nav  ")]);
    }

    if has_accounts {
        spans.extend([
            key("Enter"),
            Span::raw(":Copy  "),
            key("J/K"),
            Span::raw(":Move  "),
            key("e"),
            Span::raw(":Edit  "),
            key("d"),
            Span::raw(":Delete  "),
            key("D"),
            Span::raw(":Bulk Delete  "),
        ]);
    }

    spans.extend([key("a"), Span::raw(":Add  "), key("b"), Span::raw(":Backup  ")]);

    if has_search_query {
        spans.extend([key("Esc"), Span::raw(":Clear Search  ")]);
    } else {
        spans.extend([key("/"), Span::raw(":Search  ")]);
    }

    spans.extend([key("q"), Span::raw(":Quit")]);
    spans
}

/// Render the hotkey legend
pub fn render_legend(
    f: &mut Frame,
    area: Rect,
    vim_mode: bool,
    search_mode: bool,
    has_search_query: bool,
    has_accounts: bool,
) {
    let line = Line::from(build_hotkey_spans(vim_mode, search_mode, has_search_query, has_accounts));
    let legend = Paragraph::new(vec![line])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false });
    f.render_widget(legend, area);
}

/// Required legend height for the terminal width, borders included
pub fn calculate_legend_height(
    terminal_width: u16,
    vim_mode: bool,
    search_mode: bool,
    has_search_query: bool,
    has_accounts: bool,
) -> u16 {
    // Count lines without the block; line_count() ignores borders
    let line = Line::from(build_hotkey_spans(vim_mode, search_mode, has_search_query, has_accounts));
    let paragraph = Paragraph::new(vec![line]).wrap(ratatui::widgets::Wrap { trim: false });
    let line_count = paragraph.line_count(terminal_width.saturating_sub(2));
    (line_count as u16).saturating_add(2).max(3)
}
