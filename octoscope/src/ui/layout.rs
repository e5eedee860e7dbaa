//! Responsive panel layout for octoscope.
//!
//! This module is pure layout arithmetic plus the two pieces of chrome shared by
//! every panel (bordered blocks and the status bar). It is called inside
//! `terminal.draw()` on every render so each frame reflects the current
//! terminal size.
//!
//! # Panel geometry
//!
//! At `>= 100` columns the profile card and saved list stack on the left and
//! the repository list fills the right. Narrower terminals stack all three.
//!
//! `Spacing::Overlap(1)` combined with `Block::merge_borders(MergeStrategy::Fuzzy)`
//! makes adjacent panel borders share a single column.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode, PanelFocus};
use crate::theme::Theme;

/// Outer height of the profile card, borders included.
const CARD_HEIGHT: u16 = 11;

/// Outer rects of every fixed panel for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Panels {
    pub search: Rect,
    /// Zero-height unless there is an error to show.
    pub banner: Rect,
    pub card: Rect,
    pub repositories: Rect,
    pub saved: Rect,
    pub status_bar: Rect,
}

/// Splits `area` into the panels of one frame.
///
/// # Arguments
///
/// * `area`: the full frame area
/// * `state`: read-only app state; the banner row only exists while there is an error
pub fn compute_layout(area: Rect, state: &AppState) -> Panels {
    let banner_height = u16::from(state.search.state().error.is_some());

    let [search, banner, body, status_bar] = area.layout(&Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(banner_height),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]));

    let (card, repositories, saved) = if area.width >= 100 {
        let [left, right] = body.layout(
            &Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .spacing(Spacing::Overlap(1)),
        );
        let [card, saved] = left.layout(
            &Layout::vertical([Constraint::Length(CARD_HEIGHT), Constraint::Fill(1)])
                .spacing(Spacing::Overlap(1)),
        );
        (card, right, saved)
    } else {
        let saved_height = (state.saved.len() as u16).clamp(1, 4) + 2;
        let [card, repositories, saved] = body.layout(
            &Layout::vertical([
                Constraint::Length(CARD_HEIGHT),
                Constraint::Fill(1),
                Constraint::Length(saved_height),
            ])
            .spacing(Spacing::Overlap(1)),
        );
        (card, repositories, saved)
    };

    Panels {
        search,
        banner,
        card,
        repositories,
        saved,
        status_bar,
    }
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border on each side.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin {
        vertical: 1,
        horizontal: 1,
    })
}

/// Builds a bordered `Block` for a panel.
///
/// Focused panels get a thick border in `border_active`; the rest get a plain
/// border in `border_inactive`. `MergeStrategy::Fuzzy` is used because `Exact`
/// draws wrong junctions when `Thick` and `Plain` borders meet.
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused {
        BorderType::Thick
    } else {
        BorderType::Plain
    };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar: a mode indicator followed by key hints for
/// the focused panel.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    theme: &Theme,
    now: Instant,
) {
    let mode_text = match (state.mode, state.focus) {
        (Mode::HelpOverlay, _) => " HELP ",
        (Mode::ConfirmRemove, _) => " CONFIRM ",
        (Mode::Normal, PanelFocus::Search) => " SEARCH ",
        (Mode::Normal, PanelFocus::Repositories) => " REPOS ",
        (Mode::Normal, PanelFocus::Saved) => " SAVED ",
    };

    let hints: &[(&str, &str)] = match (state.mode, state.focus) {
        (Mode::HelpOverlay, _) => &[("j/k", "scroll"), ("Esc", "close")],
        (Mode::ConfirmRemove, _) => &[("y", "remove"), ("n", "cancel")],
        (Mode::Normal, PanelFocus::Search) => &[
            ("Enter", "search"),
            ("↑/↓", "suggestions"),
            ("Esc", "clear"),
            ("Tab", "next panel"),
            ("F1", "help"),
        ],
        (Mode::Normal, PanelFocus::Repositories) => &[
            ("j/k", "move"),
            ("Ctrl-s", "save"),
            ("Tab", "next panel"),
            ("?", "help"),
            ("q", "quit"),
        ],
        (Mode::Normal, PanelFocus::Saved) => &[
            ("Enter", "load"),
            ("d", "remove"),
            ("Tab", "next panel"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let mut spans = vec![Span::styled(
        mode_text,
        Style::default()
            .fg(theme.status_key)
            .add_modifier(Modifier::BOLD),
    )];
    // `u` types into the search input; only Ctrl-z undoes from there.
    let undo_key = if state.focus == PanelFocus::Search { "Ctrl-z" } else { "u" };
    let undo = state.undo_available(now).then_some((undo_key, "undo"));
    for (key, what) in hints.iter().copied().chain(undo) {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(key, Style::default().fg(theme.status_key)));
        spans.push(Span::raw(format!(" {what}")));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(
            Style::default()
                .bg(theme.status_bar_bg)
                .fg(theme.status_bar_fg),
        ),
        area,
    );
}
