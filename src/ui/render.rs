use std::time::Instant;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{account_list, dialogs, layout, legend, search, toast};
use crate::logic::layout::{rows_that_fit, scroll_offset};
use crate::model::Modal;
use crate::App;

/// Main render function - orchestrates all UI rendering
///
/// Also records the list area and scroll offset the mouse handler hit-tests
/// against on the next event.
pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let now = Instant::now();
    let model = &mut app.model;

    let query_active = !model.store.search_query.is_empty();
    let search_visible = model.ui.search_mode || query_active;
    let has_accounts = !model.store.is_empty();

    let legend_height = legend::calculate_legend_height(
        size.width,
        model.ui.vim_mode,
        model.ui.search_mode,
        query_active,
        has_accounts,
    );
    let layout_info = layout::calculate_layout(size, legend_height, search_visible);

    // Title bar
    let remaining = model.view.remaining.ceil() as u64;
    let title = Line::from(vec![
        Span::styled(" authtui ", Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {} accounts  ", model.store.len())),
        Span::styled(format!("next code in {}s", remaining), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(title), layout_info.title_area);

    // Account list
    let inner = account_list::list_block(model.store.len()).inner(layout_info.list_area);
    model.ui.list_area = inner;
    model.ui.scroll = scroll_offset(model.ui.cursor, rows_that_fit(inner.height), model.ui.scroll);
    account_list::render_account_list(f, layout_info.list_area, model, app.config.cell_width_px, now);

    if let Some(search_area) = layout_info.search_area {
        search::render_search_input(
            f,
            search_area,
            &model.store.search_query,
            model.ui.search_mode,
            model.view.visible_count(),
        );
    }

    legend::render_legend(
        f,
        layout_info.legend_area,
        model.ui.vim_mode,
        model.ui.search_mode,
        query_active,
        has_accounts,
    );

    // Dialogs
    match &model.ui.modal {
        Some(Modal::Add(form)) => dialogs::render_add(f, form),
        Some(Modal::Edit(dialog)) => dialogs::render_edit(f, dialog, &model.store),
        Some(Modal::BulkDelete(selection)) => dialogs::render_bulk_delete(f, selection, &model.store),
        Some(Modal::Backup(form)) => dialogs::render_backup(f, form),
        None => {}
    }

    // Confirmation stacks above everything else
    if let Some(pending) = model.ui.confirm.pending() {
        dialogs::render_confirmation(f, pending);
    }

    if let Some((message, _timestamp)) = &model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
