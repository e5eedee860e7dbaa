//! Keybinding and mouse dispatcher for octoscope.
//!
//! Translates raw crossterm events into `AppState` mutations and returns a
//! `KeyAction` telling the event loop whether to continue or quit. The key
//! dispatcher branches first on `state.mode` so HelpOverlay, ConfirmRemove and
//! Normal each have an isolated handler; Normal then branches on focus,
//! because the search input swallows printable keys.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use octoscope_core::suggest::{KeyOutcome, SuggestionKey};
use ratatui::layout::{Position, Rect};

use crate::app::{AppState, Mode, PanelFocus};
use crate::ui::help;
use crate::ui::profile::REPO_ITEM_HEIGHT;

/// Control-flow signal returned from the dispatchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue the event loop normally.
    Continue,
    /// Exit cleanly.
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
///
/// # Arguments
///
/// * `key`: the raw crossterm key event (code + modifiers)
/// * `state`: mutable reference to all UI state
/// * `now`: wall clock, used for the undo window
pub fn handle_key(key: KeyEvent, state: &mut AppState, now: Instant) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::ConfirmRemove => handle_confirm_remove(key, state),
        Mode::Normal => handle_normal(key, state, now),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

/// Handles bindings that work from every panel, then defers to the focused one.
fn handle_normal(key: KeyEvent, state: &mut AppState, now: Instant) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Tab => {
            state.focus_next();
            return KeyAction::Continue;
        }
        KeyCode::BackTab => {
            state.focus_prev();
            return KeyAction::Continue;
        }
        KeyCode::F(1) => {
            open_help(state);
            return KeyAction::Continue;
        }
        KeyCode::Char('s') if ctrl => {
            state.toggle_save_current();
            return KeyAction::Continue;
        }
        KeyCode::Char('z') if ctrl => {
            state.undo_last_removal(now);
            return KeyAction::Continue;
        }
        _ => {}
    }

    if state.focus == PanelFocus::Search {
        return handle_search_input(key, state);
    }

    if let Some(action) = handle_list_key(key, state) {
        return action;
    }

    match key.code {
        KeyCode::Enter if state.focus == PanelFocus::Saved => {
            if let Some(name) = state.selected_saved() {
                state.load_profile(&name);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete if state.focus == PanelFocus::Saved => {
            if let Some(name) = state.selected_saved() {
                state.request_remove(&name);
            }
        }
        KeyCode::Char('u') => {
            state.undo_last_removal(now);
        }
        KeyCode::Char('/') | KeyCode::Esc => state.set_focus(PanelFocus::Search),
        KeyCode::Char('?') => open_help(state),
        KeyCode::Char('q') => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::Continue
}

/// Keys while the search input has focus.
///
/// Arrow keys, Enter and Esc go to the suggestion controller first; a plain
/// Esc it has no use for clears the whole search.
fn handle_search_input(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let suggestion_key = match key.code {
        KeyCode::Up => Some(SuggestionKey::Up),
        KeyCode::Down => Some(SuggestionKey::Down),
        KeyCode::Enter => Some(SuggestionKey::Enter),
        KeyCode::Esc => Some(SuggestionKey::Escape),
        _ => None,
    };
    if let Some(sk) = suggestion_key {
        match state.suggestions.on_key(sk) {
            KeyOutcome::Search(username) => state.submit(&username),
            KeyOutcome::Handled => state.sync_dropdown(),
            KeyOutcome::Ignored if sk == SuggestionKey::Escape => state.clear_search(),
            KeyOutcome::Ignored => {}
        }
        return KeyAction::Continue;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => state.clear_search(),
        KeyCode::Char(c) if !ctrl => state.input_char(c),
        KeyCode::Backspace => state.input_backspace(),
        KeyCode::Delete => state.input_delete(),
        KeyCode::Left => state.cursor_left(),
        KeyCode::Right => state.cursor_right(),
        KeyCode::Home => state.cursor_home(),
        KeyCode::End => state.cursor_end(),
        _ => {}
    }
    KeyAction::Continue
}

/// Cursor movement in the repository and saved lists.
///
/// Returns `Some(KeyAction)` when the key was consumed.
fn handle_list_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_up(1),
        KeyCode::Char('g') | KeyCode::Home => state.scroll_top(),
        KeyCode::Char('G') | KeyCode::End => state.scroll_bottom(),
        KeyCode::PageDown => state.scroll_down(5),
        KeyCode::PageUp => state.scroll_up(5),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

fn open_help(state: &mut AppState) {
    state.help_scroll = 0;
    state.mode = Mode::HelpOverlay;
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

/// j/k/g/G scroll the overlay; `?`, `q`, Esc or F1 dismiss it.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = (state.help_scroll + 1).min(help::line_count());
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('G') => state.help_scroll = help::line_count(),
        KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc | KeyCode::F(1) => {
            state.mode = Mode::Normal;
        }
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// ConfirmRemove mode
// ---------------------------------------------------------------------------

/// `y` / Enter removes, `n` / Esc cancels; everything else is ignored.
fn handle_confirm_remove(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => state.confirm_remove(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => state.cancel_remove(),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Handles a mouse event against the areas cached by the last render.
///
/// Left click picks suggestions, focuses panels, loads saved profiles and
/// toggles the save marker; right click on a saved profile asks to remove it;
/// hovering the dropdown moves its highlight; the wheel scrolls the list under
/// the pointer. Modal overlays swallow mouse input, except the wheel in help.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    let pos = Position {
        x: mouse.column,
        y: mouse.row,
    };
    match state.mode {
        Mode::HelpOverlay => {
            match mouse.kind {
                MouseEventKind::ScrollDown => {
                    state.help_scroll = (state.help_scroll + 3).min(help::line_count());
                }
                MouseEventKind::ScrollUp => {
                    state.help_scroll = state.help_scroll.saturating_sub(3);
                }
                _ => {}
            }
            return KeyAction::Continue;
        }
        Mode::ConfirmRemove => return KeyAction::Continue,
        Mode::Normal => {}
    }

    match mouse.kind {
        MouseEventKind::Moved => {
            if let Some(index) = row_index(state.hit.dropdown, pos, 1, state.dropdown_state.offset()) {
                state.suggestions.on_hover(index);
                state.sync_dropdown();
            }
        }
        MouseEventKind::Down(MouseButton::Left) => handle_left_click(pos, state),
        MouseEventKind::Down(MouseButton::Right) => {
            if let Some(index) = row_index(state.hit.saved, pos, 1, state.saved_list_state.offset()) {
                if let Some(name) = state.saved.profiles().get(index).map(|u| u.to_string()) {
                    state.saved_list_state.select(Some(index));
                    state.request_remove(&name);
                }
            }
        }
        MouseEventKind::ScrollDown => scroll_under(pos, state, true),
        MouseEventKind::ScrollUp => scroll_under(pos, state, false),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_left_click(pos: Position, state: &mut AppState) {
    if let Some(index) = row_index(state.hit.dropdown, pos, 1, state.dropdown_state.offset()) {
        if let Some(username) = state.suggestions.on_suggestion_click(index) {
            state.submit(&username);
        }
        return;
    }
    if state.hit.input.contains(pos) {
        state.set_focus(PanelFocus::Search);
        return;
    }

    // Anywhere else closes the dropdown, even when the focus stays put.
    state.suggestions.on_blur_outside();
    state.sync_dropdown();

    if state.hit.save_toggle.contains(pos) {
        state.toggle_save_current();
    } else if let Some(index) = row_index(state.hit.saved, pos, 1, state.saved_list_state.offset()) {
        state.set_focus(PanelFocus::Saved);
        if let Some(name) = state.saved.profiles().get(index).map(|u| u.to_string()) {
            state.saved_list_state.select(Some(index));
            state.load_profile(&name);
        }
    } else if let Some(index) = row_index(
        state.hit.repositories,
        pos,
        REPO_ITEM_HEIGHT,
        state.repo_list_state.offset(),
    ) {
        state.set_focus(PanelFocus::Repositories);
        state.select_repository(index);
    }
}

/// Scrolls whichever list is under the pointer by 3 rows.
fn scroll_under(pos: Position, state: &mut AppState, down: bool) {
    let target = if state.hit.saved.contains(pos) {
        PanelFocus::Saved
    } else if state.hit.repositories.contains(pos) {
        PanelFocus::Repositories
    } else {
        return;
    };
    state.set_focus(target);
    if down {
        state.scroll_down(3);
    } else {
        state.scroll_up(3);
    }
}

/// Maps a pointer position inside a list's inner `area` to an item index.
///
/// `item_height` is the number of rows per item and `offset` the list's
/// current scroll offset. Returns `None` outside the area.
fn row_index(area: Rect, pos: Position, item_height: u16, offset: usize) -> Option<usize> {
    if !area.contains(pos) {
        return None;
    }
    let row = (pos.y - area.y) / item_height.max(1);
    Some(offset + usize::from(row))
}
