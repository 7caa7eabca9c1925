//! Account List UI
//!
//! Two terminal lines per account: labels and code on the first, secondary
//! name and countdown gauge on the second. Swipe reveal, drag marks and the
//! copied flash are drawn from the transient controller state.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::logic::countdown::gauge_ratio;
use crate::logic::formatting::truncate_to_width;
use crate::logic::gesture::{Affordance, Reveal};
use crate::logic::layout::{centered, row_area};
use crate::logic::search::{placeholder, ListPlaceholder};
use crate::model::{Account, CodeCell, Model};

const GAUGE_WIDTH: usize = 10;

/// Seconds left at which the countdown turns red
const WARN_SECS: f64 = 5.0;

/// Per-row decorations
#[derive(Clone, Copy, Debug, Default)]
struct RowMarks {
    selected: bool,
    dragging: bool,
    drop_target: bool,
    copied: bool,
}

/// Text gauge for the countdown, e.g. `██████░░░░ 18s`
pub fn countdown_gauge(remaining: f64) -> String {
    let filled = (gauge_ratio(remaining) * GAUGE_WIDTH as f64).round() as usize;
    format!(
        "{}{} {:>2}s",
        "█".repeat(filled),
        "░".repeat(GAUGE_WIDTH - filled.min(GAUGE_WIDTH)),
        remaining.ceil() as u64
    )
}

/// The outer block of the list, for computing the hit-test area
pub fn list_block(total: usize) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" Accounts ({}) ", total))
        .border_style(Style::default().fg(Color::Gray))
}

/// Render the account list inside `area`
pub fn render_account_list(f: &mut Frame, area: Rect, model: &Model, cell_width_px: u16, now: Instant) {
    let block = list_block(model.store.len());
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(kind) = placeholder(
        model.store.len(),
        model.view.visible_count(),
        &model.store.search_query,
    ) {
        render_placeholder(f, inner, kind, &model.store.search_query);
        return;
    }

    let reveal = model.gesture.reveal();
    let scale = f64::from(cell_width_px.max(1));

    for (index, row) in model.view.visible_rows().enumerate().skip(model.ui.scroll) {
        let Some(rect) = row_area(inner, model.ui.scroll, index) else {
            break;
        };
        let Some(account) = model.store.get(row.id) else {
            continue;
        };
        let marks = RowMarks {
            selected: index == model.ui.cursor,
            dragging: model.drag.dragging() == Some(row.id),
            drop_target: model.drag.highlighted() == Some(row.id),
            copied: model.ui.is_copied(row.id, now),
        };
        let row_reveal = reveal.filter(|r| r.item == row.id);
        render_row(
            f,
            rect,
            account,
            model.view.code(row.id),
            model.view.remaining,
            marks,
            row_reveal,
            scale,
        );
    }
}

fn render_placeholder(f: &mut Frame, area: Rect, kind: ListPlaceholder, query: &str) {
    let lines = match kind {
        ListPlaceholder::Empty => vec![
            Line::from(Span::styled("No accounts yet", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled("Press a to add one", Style::default().fg(Color::Gray))),
        ],
        ListPlaceholder::NoResults => vec![
            Line::from(Span::styled("No results", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(
                format!("Nothing matches \"{}\"", query.trim()),
                Style::default().fg(Color::Gray),
            )),
        ],
    };
    let target = centered(area, area.width, 2);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), target);
}

#[allow(clippy::too_many_arguments)]
fn render_row(
    f: &mut Frame,
    area: Rect,
    account: &Account,
    code: &CodeCell,
    remaining: f64,
    marks: RowMarks,
    reveal: Option<Reveal>,
    scale: f64,
) {
    // Swipe: slide the row over and show the affordance in the gap
    let mut content = area;
    if let Some(reveal) = reveal {
        let max_shift = area.width / 2;
        let shift = ((reveal.offset.abs() / scale).round() as u16).min(max_shift);
        if shift > 0 {
            let gap = match reveal.affordance {
                Affordance::Edit => {
                    content = Rect { x: area.x + shift, width: area.width - shift, ..area };
                    Rect { width: shift, ..area }
                }
                Affordance::Delete => {
                    content = Rect { width: area.width - shift, ..area };
                    Rect { x: area.x + area.width - shift, width: shift, ..area }
                }
            };
            render_affordance(f, gap, reveal);
        }
    }

    let mut base = Style::default();
    if marks.selected {
        base = base.bg(Color::DarkGray);
    }
    if marks.dragging {
        base = base.add_modifier(Modifier::DIM);
    }
    if marks.drop_target {
        base = base.add_modifier(Modifier::UNDERLINED);
    }

    let marker = if marks.drop_target {
        "▶ "
    } else if marks.dragging {
        "≡ "
    } else if marks.selected {
        "› "
    } else {
        "  "
    };

    let (code_text, code_style) = if marks.copied {
        ("✓ Copied".to_string(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        match code {
            CodeCell::Code(_) => (code.text(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            CodeCell::Pending => (code.text(), Style::default().fg(Color::Gray)),
            CodeCell::Error => (code.text(), Style::default().fg(Color::Red)),
        }
    };

    let width = content.width as usize;
    let code_width = code_text.width();
    let name_room = width.saturating_sub(marker.width() + code_width + 1);
    let name = truncate_to_width(account.display_name(), name_room);
    let pad = width.saturating_sub(marker.width() + name.width() + code_width);

    let top = Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(pad)),
        Span::styled(code_text, code_style),
    ]);

    let gauge = countdown_gauge(remaining);
    let gauge_color = if remaining <= WARN_SECS { Color::Red } else { Color::Blue };
    let secondary_room = width.saturating_sub(2 + gauge.width() + 1);
    let secondary = truncate_to_width(account.secondary_name().unwrap_or(""), secondary_room);
    let pad = width.saturating_sub(2 + secondary.width() + gauge.width());

    let bottom = Line::from(vec![
        Span::raw("  "),
        Span::styled(secondary, Style::default().fg(Color::Gray)),
        Span::raw(" ".repeat(pad)),
        Span::styled(gauge, Style::default().fg(gauge_color)),
    ]);

    f.render_widget(Paragraph::new(vec![top, bottom]).style(base), content);
}

fn render_affordance(f: &mut Frame, area: Rect, reveal: Reveal) {
    let (label, color) = match reveal.affordance {
        Affordance::Edit => ("✎ Edit", Color::Green),
        Affordance::Delete => ("✗ Delete", Color::Red),
    };
    let mut style = Style::default().fg(Color::Black).bg(color);
    if reveal.amount < 1.0 {
        style = style.add_modifier(Modifier::DIM);
    } else {
        style = style.add_modifier(Modifier::BOLD);
    }
    let label = truncate_to_width(label, area.width as usize);
    let alignment = match reveal.affordance {
        Affordance::Edit => Alignment::Left,
        Affordance::Delete => Alignment::Right,
    };
    f.render_widget(
        Paragraph::new(vec![Line::from(label), Line::from("")])
            .style(style)
            .alignment(alignment),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_full_at_cycle_start() {
        assert_eq!(countdown_gauge(30.0), "██████████ 30s");
    }

    #[test]
    fn test_gauge_half() {
        assert_eq!(countdown_gauge(15.0), "█████░░░░░ 15s");
    }

    #[test]
    fn test_gauge_rounds_seconds_up() {
        assert!(countdown_gauge(0.2).ends_with(" 1s"));
    }
}
