//! Help overlay renderer for octoscope.
//!
//! Draws a centred modal over the panels, erasing the background with `Clear`
//! inside the same `terminal.draw()` closure.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay as a centred modal.
///
/// Skipped on terminals narrower than 50 columns.
///
/// # Arguments
///
/// * `frame`: current render frame provided by `terminal.draw()`
/// * `theme`: active color theme
/// * `help_scroll`: vertical scroll offset; j/k in HelpOverlay mode mutate this field
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 50 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help · j/k scroll, Esc to dismiss ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text(theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Search input",
        &[
            ("type", "Edit the username; suggestions appear after a short pause"),
            ("↑ / ↓", "Move through suggestions (wraps around)"),
            ("Enter", "Load the highlighted suggestion, or the typed username"),
            ("Esc", "Close suggestions; with none open, clear the search"),
            ("← / →  Home / End", "Move the text cursor"),
        ],
    ),
    (
        "Repositories and saved profiles",
        &[
            ("j / k  ↑ / ↓", "Move the cursor"),
            ("g / G", "Jump to first / last"),
            ("Enter", "Load the selected saved profile"),
            ("d / Delete", "Remove the selected saved profile (asks first)"),
            ("/ or Esc", "Back to the search input"),
        ],
    ),
    (
        "Anywhere",
        &[
            ("Tab / Shift-Tab", "Next / previous panel"),
            ("Ctrl-s", "Save the open profile, or remove it if saved"),
            ("u / Ctrl-z", "Undo the last removal while the toast offers it"),
            ("F1 / ?", "Open this help (? only outside the input)"),
            ("q / Ctrl-c", "Quit (q only outside the input)"),
        ],
    ),
    (
        "Mouse",
        &[
            ("hover / click", "Highlight / pick a suggestion"),
            ("click", "Load a saved profile, toggle save on the card"),
            ("right-click", "Remove a saved profile"),
            ("wheel", "Scroll the list under the pointer"),
        ],
    ),
];

/// Number of lines in the help text, the upper bound for `help_scroll`.
pub fn line_count() -> u16 {
    let rows: usize = SECTIONS.iter().map(|(_, bindings)| bindings.len() + 2).sum();
    (rows - 1) as u16
}

/// Builds the help text, one section per group of bindings.
fn build_help_text(theme: &Theme) -> Text<'static> {
    let mut lines = Vec::new();
    for (i, (title, bindings)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            *title,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        for (keys, what) in bindings.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<20}"), Style::default().fg(theme.status_key)),
                Span::raw(*what),
            ]));
        }
    }
    Text::from(lines)
}
