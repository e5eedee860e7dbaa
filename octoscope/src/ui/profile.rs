//! Profile card and repository list, with their loading and empty states.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style, Stylize as _},
    text::{Line, Span, Text},
    widgets::{HighlightSpacing, List, ListItem, Paragraph, Wrap},
};

use octoscope_core::types::{FullProfile, Repository};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Rows each repository occupies in the list.
pub const REPO_ITEM_HEIGHT: u16 = 2;

/// Renders the profile card. Returns the rect of the save toggle drawn on its
/// top border, or an empty rect when no profile is shown.
pub fn render_card(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) -> Rect {
    let block = panel_block(" Profile ", false, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let search = state.search.state();
    if search.loading {
        render_skeleton(frame, inner, &[18, 10, 32, 26, 0, 24], theme);
        return Rect::default();
    }
    let Some(bundle) = search.result.as_ref() else {
        if !search.has_searched && search.error.is_none() {
            render_empty_state(frame, inner, theme);
        }
        return Rect::default();
    };

    let profile = &bundle.profile;
    frame.render_widget(
        Paragraph::new(card_text(profile, theme)).wrap(Wrap { trim: true }),
        inner,
    );

    let saved = state.saved.is_saved(profile.username());
    let (label, color) = if saved {
        (" ★ Saved ", theme.saved_marker)
    } else {
        (" ☆ Save ", theme.muted)
    };
    let width = label.chars().count() as u16;
    if area.width < width + 12 {
        return Rect::default();
    }
    let toggle = Rect {
        x: area.right() - width - 2,
        y: area.y,
        width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))),
        toggle,
    );
    toggle
}

fn card_text<'a>(profile: &'a FullProfile, theme: &Theme) -> Text<'a> {
    let summary = &profile.summary;
    let mut lines = vec![
        Line::from(Span::styled(
            summary.label(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("@{}", summary.username),
            Style::default().fg(theme.accent),
        )),
    ];
    if let Some(bio) = summary.bio.as_deref() {
        lines.push(Line::from(Span::styled(bio, Style::default().fg(theme.muted))));
    }
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(compact(profile.followers), Style::default().fg(theme.text).bold()),
        Span::styled(" followers  ", Style::default().fg(theme.muted)),
        Span::styled(compact(profile.following), Style::default().fg(theme.text).bold()),
        Span::styled(" following  ", Style::default().fg(theme.muted)),
        Span::styled(compact(profile.public_repo_count), Style::default().fg(theme.text).bold()),
        Span::styled(" repos", Style::default().fg(theme.muted)),
    ]));
    lines.push(Line::from(Span::styled(
        profile.profile_url.as_str(),
        Style::default().fg(theme.accent).add_modifier(Modifier::UNDERLINED),
    )));
    Text::from(lines)
}

/// Shown before the first search.
fn render_empty_state(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = Text::from(vec![
        Line::from("Search for GitHub Profiles".bold().fg(theme.text)),
        Line::default(),
        Line::from(
            "Enter a username above to view the profile and its repositories. \
             Ctrl-s saves a profile for quick access later."
                .fg(theme.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), area);
}

/// Placeholder bars of the given widths, one per row; `0` leaves the row blank.
fn render_skeleton(frame: &mut Frame, area: Rect, widths: &[u16], theme: &Theme) {
    let lines: Vec<Line> = widths
        .iter()
        .map(|&w| {
            let w = w.min(area.width) as usize;
            Line::from(Span::styled("▒".repeat(w), Style::default().fg(theme.skeleton)))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the repository list. Returns its inner rect for mouse mapping.
pub fn render_repositories(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    theme: &Theme,
) -> Rect {
    let focused = state.focus == PanelFocus::Repositories;
    let inner = inner_rect(area);
    let search = state.search.state();

    if search.loading {
        frame.render_widget(panel_block(" Repositories ", focused, theme), area);
        let bars: Vec<u16> = (0..inner.height)
            .map(|row| if row % 2 == 0 { 28 - (row % 3) * 6 } else { 44 - (row % 5) * 4 })
            .collect();
        render_skeleton(frame, inner, &bars, theme);
        return Rect::default();
    }

    let Some(bundle) = search.result.as_ref() else {
        frame.render_widget(panel_block(" Repositories ", focused, theme), area);
        return Rect::default();
    };

    let title = format!(" Repositories ({}) ", bundle.repositories.len());
    let block = panel_block(title, focused, theme);
    if bundle.repositories.is_empty() {
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new("No public repositories.".fg(theme.muted)),
            inner,
        );
        return Rect::default();
    }

    let items: Vec<ListItem> = bundle
        .repositories
        .iter()
        .map(|r| repo_item(r, theme))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.selection_bg).fg(theme.selection_fg))
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_symbol("▌");
    frame.render_stateful_widget(list, area, &mut state.repo_list_state);
    inner
}

fn repo_item<'a>(repo: &'a Repository, theme: &Theme) -> ListItem<'a> {
    let mut head = vec![
        Span::styled(
            repo.name.as_str(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ★ {}", compact(repo.star_count)), Style::default().fg(theme.stars)),
    ];
    if let Some(language) = repo.primary_language.as_deref() {
        head.push(Span::styled(format!("  ● {language}"), Style::default().fg(theme.language)));
    }
    let description = repo.description.as_deref().unwrap_or("No description provided");
    ListItem::new(Text::from(vec![
        Line::from(head),
        Line::from(Span::styled(description, Style::default().fg(theme.muted))),
    ]))
}

/// Formats a count the way GitHub does: `987`, `1.5k`, `223k`, `1.2m`.
pub fn compact(n: u32) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=99_999 => trim_point(format!("{:.1}k", f64::from(n) / 1_000.0)),
        100_000..=999_999 => format!("{}k", n / 1_000),
        _ => trim_point(format!("{:.1}m", f64::from(n) / 1_000_000.0)),
    }
}

fn trim_point(s: String) -> String {
    s.replace(".0", "")
}

#[cfg(test)]
mod tests {
    use super::compact;

    #[test]
    fn counts_are_compacted() {
        assert_eq!(compact(0), "0");
        assert_eq!(compact(999), "999");
        assert_eq!(compact(1_000), "1k");
        assert_eq!(compact(1_520), "1.5k");
        assert_eq!(compact(11_257), "11.3k");
        assert_eq!(compact(223_000), "223k");
        assert_eq!(compact(1_240_000), "1.2m");
    }
}
