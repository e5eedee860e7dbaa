//! Saved-profiles panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize as _},
    text::{Line, Span},
    widgets::{HighlightSpacing, List, ListItem, Paragraph, Wrap},
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the saved list. Returns its inner rect for mouse mapping.
pub fn render_saved(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) -> Rect {
    let focused = state.focus == PanelFocus::Saved;
    let inner = inner_rect(area);
    let title = format!(" Saved profiles ({}) ", state.saved.len());
    let block = panel_block(title, focused, theme).title_bottom(
        Line::from(" Enter load · d / right-click remove ".fg(theme.muted)).right_aligned(),
    );

    if state.saved.is_empty() {
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new("No saved profiles yet. Ctrl-s saves the open profile.".fg(theme.muted))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return Rect::default();
    }

    let current = state.search.current_username();
    let items: Vec<ListItem> = state
        .saved
        .profiles()
        .iter()
        .map(|name| {
            let shown = current.is_some_and(|c| name.matches(c));
            let marker = if shown { "● " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.saved_marker)),
                Span::styled(name.as_str(), Style::default().fg(theme.text)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.selection_bg).fg(theme.selection_fg))
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_symbol("▌");
    frame.render_stateful_widget(list, area, &mut state.saved_list_state);
    inner
}
