//! The username input, the error banner beneath it, and the suggestion dropdown.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style, Stylize as _},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, HighlightSpacing, List, ListItem, Paragraph},
};

use crate::app::{AppState, Mode, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

const PROMPT: &str = "› ";

/// Most suggestion rows shown at once.
const MAX_DROPDOWN_ROWS: u16 = 8;

/// Renders the input box and, when it has focus, places the terminal cursor.
pub fn render_input(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == PanelFocus::Search;
    let mut block = panel_block(" Username ", focused, theme);
    if state.search.state().loading {
        block = block.title(Line::from(" loading… ".fg(theme.muted)).right_aligned());
    }

    let query = state.suggestions.query();
    let line = if query.is_empty() {
        Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(theme.accent)),
            Span::styled("Type a username, e.g. octocat", Style::default().fg(theme.muted)),
        ])
    } else {
        Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(theme.accent)),
            Span::styled(query.to_owned(), Style::default().fg(theme.text)),
        ])
    };

    let inner = inner_rect(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(line), inner);

    if focused && state.mode == Mode::Normal && inner.width > 0 {
        let offset = cursor_column(query, state.cursor).min(inner.width - 1);
        frame.set_cursor_position(Position {
            x: inner.x + offset,
            y: inner.y,
        });
    }
}

/// Display column of the text cursor, prompt included.
///
/// Measured in terminal cells so wide characters push the cursor by two.
/// Saturates at `u16::MAX`.
fn cursor_column(query: &str, cursor: usize) -> u16 {
    let before: String = query.chars().take(cursor).collect();
    let cells = Span::raw(PROMPT).width() + Span::raw(before).width();
    u16::try_from(cells).unwrap_or(u16::MAX)
}

/// Renders the current search error, if any, as a single line.
pub fn render_banner(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(error) = state.search.state().error.as_ref() else {
        return;
    };
    let line = Line::from(vec![
        Span::styled(" ✗ ", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
        Span::styled(error.to_string(), Style::default().fg(theme.error)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draws the suggestion dropdown directly under `input` when it is open.
///
/// Returns the inner rect holding the rows, or an empty rect when nothing was
/// drawn, so mouse events can be mapped back to suggestion indices.
pub fn render_dropdown(
    frame: &mut Frame,
    input: Rect,
    state: &mut AppState,
    theme: &Theme,
) -> Rect {
    let suggestions = state.suggestions.state();
    if !suggestions.visible || suggestions.items.is_empty() {
        return Rect::default();
    }

    let rows = (suggestions.items.len() as u16).min(MAX_DROPDOWN_ROWS);
    let area = Rect {
        x: input.x,
        y: input.bottom().saturating_sub(1),
        width: input.width,
        height: rows + 2,
    }
    .intersection(frame.area());
    if area.height < 3 {
        return Rect::default();
    }

    let items: Vec<ListItem> = suggestions
        .items
        .iter()
        .map(|s| {
            let mut spans = vec![Span::styled(
                s.label().to_owned(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )];
            if s.display_name.is_some() {
                spans.push(Span::styled(
                    format!("  @{}", s.username),
                    Style::default().fg(theme.muted),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_active));
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .fg(theme.selection_fg),
        )
        .highlight_symbol("▌")
        .highlight_spacing(HighlightSpacing::Always);

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state.dropdown_state);
    inner_rect(area)
}
