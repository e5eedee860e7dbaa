//! UI rendering module for octoscope.
//!
//! `render()` is the single entry point, called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`; each
//! panel has its own module, and `overlays.rs` / `help.rs` draw what sits on
//! top of them.

pub mod help;
mod layout;
mod overlays;
mod profile;
mod saved_list;
mod search_bar;
pub mod keybindings;

use std::time::Instant;

use ratatui::{Frame, style::Style, widgets::Block};

use crate::app::{AppState, HitAreas, Mode};
use crate::theme::Theme;
use layout::{compute_layout, render_status_bar};

/// Renders one complete frame.
///
/// Called exactly once per `AppEvent::Render` inside `terminal.draw()`. The
/// rects that mouse handling needs are written back into `state.hit`; the
/// next click is resolved against this frame's geometry.
///
/// # Arguments
///
/// * `frame`: current render frame provided by `terminal.draw()`
/// * `state`: app state; list cursors and hit areas are updated here
/// * `theme`: active color theme
/// * `now`: wall clock used to decide whether the undo hint is still live
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme, now: Instant) {
    let panels = compute_layout(frame.area(), state);

    frame.render_widget(
        Block::new().style(Style::default().bg(theme.background)),
        frame.area(),
    );

    search_bar::render_input(frame, panels.search, state, theme);
    search_bar::render_banner(frame, panels.banner, state, theme);
    let save_toggle = profile::render_card(frame, panels.card, state, theme);
    let repositories = profile::render_repositories(frame, panels.repositories, state, theme);
    let saved = saved_list::render_saved(frame, panels.saved, state, theme);
    render_status_bar(frame, panels.status_bar, state, theme, now);

    // Drawn after the panels so it covers whatever sits below the input.
    let dropdown = search_bar::render_dropdown(frame, panels.search, state, theme);

    overlays::render_toasts(frame, state, theme, now);
    match state.mode {
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        Mode::ConfirmRemove => overlays::render_confirm(frame, state, theme),
        Mode::Normal => {}
    }

    state.hit = HitAreas {
        input: panels.search,
        dropdown,
        save_toggle,
        repositories,
        saved,
    };
}
