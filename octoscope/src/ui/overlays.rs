//! Everything drawn on top of the panels: toasts and the removal confirmation.
//!
//! Both erase their area with `Clear` first, inside the same `terminal.draw()`
//! closure as the panels underneath.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style, Stylize as _},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
};

use crate::app::AppState;
use crate::theme::Theme;
use crate::toast::Tone;

const TOAST_WIDTH: u16 = 46;
const TOAST_HEIGHT: u16 = 4;

/// Stacks live toasts in the top-right corner, newest at the bottom.
pub fn render_toasts(frame: &mut Frame, state: &AppState, theme: &Theme, now: Instant) {
    let area = frame.area();
    if state.toasts.is_empty() || area.width < 30 {
        return;
    }
    let width = TOAST_WIDTH.min(area.width);
    let undo_live = state.undo_available(now);

    let mut y = area.y + 1;
    for toast in state.toasts.iter() {
        if y + TOAST_HEIGHT > area.bottom() {
            break;
        }
        let rect = Rect {
            x: area.right() - width,
            y,
            width,
            height: TOAST_HEIGHT,
        };
        y += TOAST_HEIGHT;

        let color = match toast.tone {
            Tone::Info => theme.toast_info,
            Tone::Success => theme.toast_success,
            Tone::Warning => theme.toast_warning,
        };
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                format!(" {} ", toast.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        if toast.offers_undo && undo_live {
            block = block.title_bottom(Line::from(" u undo ".fg(theme.status_key)).right_aligned());
        }

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(toast.body.as_str().fg(theme.text))
                .block(block)
                .wrap(Wrap { trim: true }),
            rect,
        );
    }
}

/// The "Remove Saved Profile" dialog for `state.confirm_target`.
pub fn render_confirm(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let Some(target) = state.confirm_target.as_deref() else {
        return;
    };
    let area = frame
        .area()
        .centered(Constraint::Length(52), Constraint::Length(8));
    if area.height < 5 {
        return;
    }

    let block = Block::bordered()
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(theme.toast_warning))
        .title(" Remove Saved Profile ".bold());
    let text = Text::from(vec![
        Line::from(format!(
            "Are you sure you want to remove \"{target}\" from your saved profiles?"
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("[y] Remove", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("[n] Cancel", Style::default().fg(theme.muted)),
        ])
        .centered(),
    ]);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
