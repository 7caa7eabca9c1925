use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::logic::formatting::{mask_secret, truncate_to_width};
use crate::logic::layout::centered;
use crate::model::{
    AccountStore, AddForm, AddTab, BackupForm, DeleteSelection, EditDialog, EditStage, PendingConfirmation,
    StatusKind, StatusLine,
};

/// Clear and frame a centered dialog, returning its inner area
fn dialog_frame(f: &mut Frame, title: &str, accent: Color, width: u16, height: u16) -> Rect {
    let area = centered(f.area(), width, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .style(Style::default().fg(Color::White).bg(Color::Black));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    inner
}

/// `Label: value` with a cursor on the focused field
fn field_line<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![Span::styled(format!("{:>8}: ", label), label_style), Span::raw(value)];
    if focused {
        spans.push(Span::styled(
            "█",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Line::from(spans)
}

fn status_line(status: Option<&StatusLine>) -> Line<'static> {
    let Some(status) = status else {
        return Line::from("");
    };
    let color = match status.kind {
        StatusKind::Info => Color::Cyan,
        StatusKind::Success => Color::Green,
        StatusKind::Error => Color::Red,
    };
    Line::from(Span::styled(status.text.clone(), Style::default().fg(color)))
}

fn hint_line(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

/// Render the confirmation dialog (stacks above any other dialog)
pub fn render_confirmation(f: &mut Frame, pending: &PendingConfirmation) {
    let accent = pending.accent_color();
    let title = format!(" {} {} ", pending.icon_glyph(), pending.title);
    let inner = dialog_frame(f, &title, accent, 50, 8);

    let lines = vec![
        Line::from(""),
        Line::from(pending.message.clone()),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!(" {} (y) ", pending.confirm_label),
                Style::default().fg(Color::White).bg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(" Cancel (n) ", Style::default().fg(Color::Gray)),
        ]),
    ];

    let prompt = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(prompt, inner);
}

/// Add-account dialog with manual and import tabs
pub fn render_add(f: &mut Frame, form: &AddForm) {
    let inner = dialog_frame(f, " Add Account ", Color::Cyan, 60, 11);

    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                format!(" {} ", label),
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(Color::Gray))
        }
    };

    let mut lines = vec![
        Line::from(vec![
            tab("Manual", form.tab == AddTab::Manual),
            Span::raw(" "),
            tab("Import", form.tab == AddTab::Import),
        ]),
        Line::from(""),
    ];

    match form.tab {
        AddTab::Manual => {
            lines.push(field_line("Name", form.name.clone(), form.focus == 0));
            lines.push(field_line("Issuer", form.issuer.clone(), form.focus == 1));
            lines.push(field_line("Secret", form.secret.clone(), form.focus == 2));
        }
        AddTab::Import => {
            let room = inner.width.saturating_sub(12) as usize;
            let uri = truncate_to_width(&form.uri, room);
            lines.push(field_line("URI", uri, true));
            lines.push(hint_line("Paste an otpauth-migration:// link"));
            lines.push(Line::from(""));
        }
    }

    lines.push(Line::from(""));
    lines.push(status_line(form.status.as_ref()));
    lines.push(hint_line("Tab:Field  ^T:Manual/Import  Enter:Save  Esc:Close"));

    f.render_widget(Paragraph::new(lines), inner);
}

/// Edit dialog: account picker, then the edit form
pub fn render_edit(f: &mut Frame, dialog: &EditDialog, store: &AccountStore) {
    match &dialog.stage {
        EditStage::Picking { cursor } => {
            let height = (store.len() as u16 + 5).clamp(6, 20);
            let inner = dialog_frame(f, " Edit Account ", Color::Cyan, 50, height);
            let room = inner.width.saturating_sub(2) as usize;

            let mut lines: Vec<Line> = store
                .iter()
                .enumerate()
                .map(|(i, account)| {
                    let label = truncate_to_width(account.display_name(), room);
                    if i == *cursor {
                        Line::from(Span::styled(
                            format!("► {}", label),
                            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
                        ))
                    } else {
                        Line::from(format!("  {}", label))
                    }
                })
                .collect();
            if lines.is_empty() {
                lines.push(Line::from(Span::styled("No accounts", Style::default().fg(Color::Gray))));
            }
            lines.push(Line::from(""));
            lines.push(hint_line("↑↓:Select  Enter:Edit  Esc:Close"));
            f.render_widget(Paragraph::new(lines), inner);
        }
        EditStage::Editing(form) => {
            let inner = dialog_frame(f, " Edit Account ", Color::Cyan, 60, 9);
            let lines = vec![
                field_line("Name", form.name.clone(), form.focus == 0),
                field_line("Issuer", form.issuer.clone(), form.focus == 1),
                field_line("Secret", form.secret.clone(), form.focus == 2),
                Line::from(""),
                status_line(dialog.status.as_ref()),
                hint_line("Tab:Field  Enter:Save  Esc:Close"),
            ];
            f.render_widget(Paragraph::new(lines), inner);
        }
    }
}

/// Bulk delete picker with a select-all row
pub fn render_bulk_delete(f: &mut Frame, selection: &DeleteSelection, store: &AccountStore) {
    let height = (store.len() as u16 + 6).clamp(7, 22);
    let inner = dialog_frame(f, " Delete Accounts ", Color::Red, 50, height);
    let room = inner.width.saturating_sub(6) as usize;

    let checkbox = |checked: bool| if checked { "[x]" } else { "[ ]" };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} Select all", checkbox(selection.all_checked(store.ids()))),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, account) in store.iter().enumerate() {
        let text = format!(
            "{} {}",
            checkbox(selection.checked.contains(&account.id)),
            truncate_to_width(account.display_name(), room)
        );
        let style = if i == selection.cursor {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    lines.push(Line::from(""));
    lines.push(hint_line("Space:Toggle  a:All  Enter:Delete  Esc:Close"));

    f.render_widget(Paragraph::new(lines), inner);
}

/// Backup / restore dialog
pub fn render_backup(f: &mut Frame, form: &BackupForm) {
    let inner = dialog_frame(f, " ⇪ Backup ", Color::Rgb(0x3b, 0x82, 0xf6), 60, 10);
    let room = inner.width.saturating_sub(12) as usize;

    let lines = vec![
        field_line("Token", truncate_to_width(&mask_secret(&form.token), room), form.focus == 0),
        field_line("Password", "•".repeat(form.password.chars().count().min(room)), form.focus == 1),
        field_line("Gist ID", truncate_to_width(&form.gist_id, room), form.focus == 2),
        Line::from(""),
        status_line(form.status.as_ref()),
        Line::from(""),
        hint_line("Tab:Field  Enter:Backup  ^R:Restore  Esc:Close"),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}
