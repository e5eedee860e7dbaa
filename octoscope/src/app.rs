//! Central application state for octoscope.
//!
//! `AppState` owns the three core components and the purely visual state around
//! them: mode, focus, list cursors, the text cursor of the search input, toasts,
//! the pending removal confirmation and the live undo offer. No ratatui
//! rendering happens here; `ui` reads this state and `ui::keybindings` mutates
//! it.

use std::time::{Duration, Instant};

use octoscope_core::notify::{Notification, UndoToken};
use octoscope_core::saved::SavedProfileStore;
use octoscope_core::search::{FetchUpdate, SearchOrchestrator};
use octoscope_core::suggest::{SuggestionController, SuggestionUpdate};
use octoscope_core::types::fold;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tracing::debug;

use crate::toast::{deadline, ToastQueue};

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Full-screen help overlay is shown above all panels.
    HelpOverlay,
    /// "Remove saved profile?" dialog for `AppState::confirm_target`.
    ConfirmRemove,
}

/// Which panel currently has keyboard focus.
///
/// Cycle order: `Search` → `Repositories` → `Saved` → `Search`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// The username input and its suggestion dropdown.
    #[default]
    Search,
    Repositories,
    Saved,
}

impl PanelFocus {
    /// Returns the panel that precedes `self` in the cycle (wraps around).
    pub fn prev(self) -> Self {
        match self {
            PanelFocus::Search => PanelFocus::Saved,
            PanelFocus::Repositories => PanelFocus::Search,
            PanelFocus::Saved => PanelFocus::Repositories,
        }
    }

    /// Returns the panel that follows `self` in the cycle (wraps around).
    pub fn next(self) -> Self {
        match self {
            PanelFocus::Search => PanelFocus::Repositories,
            PanelFocus::Repositories => PanelFocus::Saved,
            PanelFocus::Saved => PanelFocus::Search,
        }
    }
}

/// A removal that can still be undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUndo {
    pub username: String,
    pub token: UndoToken,
    pub expires_at: Instant,
}

/// Screen areas from the last frame, used to route mouse events.
///
/// Written by `ui::render` on every frame; all zero before the first one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HitAreas {
    pub input: Rect,
    /// Inner area of the suggestion dropdown; zero-sized while hidden.
    pub dropdown: Rect,
    /// The save toggle on the profile card.
    pub save_toggle: Rect,
    /// Inner area of the repository list.
    pub repositories: Rect,
    /// Inner area of the saved-profiles list.
    pub saved: Rect,
}

/// All mutable application state passed through every render cycle.
pub struct AppState {
    pub mode: Mode,
    pub focus: PanelFocus,

    pub suggestions: SuggestionController,
    pub search: SearchOrchestrator,
    pub saved: SavedProfileStore,

    /// Text cursor in the search input, counted in chars.
    pub cursor: usize,

    pub dropdown_state: ListState,
    pub repo_list_state: ListState,
    pub saved_list_state: ListState,
    pub help_scroll: u16,

    pub toasts: ToastQueue,
    /// Username the confirmation dialog asks about.
    pub confirm_target: Option<String>,
    pub last_removal: Option<PendingUndo>,

    pub hit: HitAreas,

    undo_window: Duration,
}

impl AppState {
    /// Builds the state around already-constructed core components.
    ///
    /// # Arguments
    ///
    /// * `toast_ttl`: how long an ordinary toast stays on screen.
    /// * `undo_window`: how long a removal can be undone from the UI.
    pub fn new(
        suggestions: SuggestionController,
        search: SearchOrchestrator,
        saved: SavedProfileStore,
        toast_ttl: Duration,
        undo_window: Duration,
    ) -> Self {
        let mut saved_list_state = ListState::default();
        if !saved.is_empty() {
            saved_list_state.select(Some(0));
        }
        Self {
            mode: Mode::default(),
            focus: PanelFocus::default(),
            suggestions,
            search,
            saved,
            cursor: 0,
            dropdown_state: ListState::default(),
            repo_list_state: ListState::default(),
            saved_list_state,
            help_scroll: 0,
            toasts: ToastQueue::new(toast_ttl),
            confirm_target: None,
            last_removal: None,
            hit: HitAreas::default(),
            undo_window,
        }
    }

    // -----------------------------------------------------------------------
    // Search input
    // -----------------------------------------------------------------------

    /// Inserts `c` at the cursor and reschedules suggestions.
    pub fn input_char(&mut self, c: char) {
        let mut chars: Vec<char> = self.suggestions.query().chars().collect();
        let at = self.cursor.min(chars.len());
        chars.insert(at, c);
        self.cursor = at + 1;
        self.suggestions.on_input(chars.into_iter().collect::<String>());
    }

    /// Deletes the char before the cursor.
    pub fn input_backspace(&mut self) {
        let mut chars: Vec<char> = self.suggestions.query().chars().collect();
        let at = self.cursor.min(chars.len());
        if at == 0 {
            return;
        }
        chars.remove(at - 1);
        self.cursor = at - 1;
        self.suggestions.on_input(chars.into_iter().collect::<String>());
    }

    /// Deletes the char under the cursor.
    pub fn input_delete(&mut self) {
        let mut chars: Vec<char> = self.suggestions.query().chars().collect();
        if self.cursor >= chars.len() {
            return;
        }
        chars.remove(self.cursor);
        self.suggestions.on_input(chars.into_iter().collect::<String>());
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.query_len());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.query_len();
    }

    fn query_len(&self) -> usize {
        self.suggestions.query().chars().count()
    }

    /// Replaces the input text without fetching suggestions.
    fn set_query(&mut self, query: &str) {
        self.suggestions.set_query(query);
        self.cursor = self.query_len();
    }

    // -----------------------------------------------------------------------
    // Searching
    // -----------------------------------------------------------------------

    /// Starts loading `username`. The input is expected to show it already.
    pub fn submit(&mut self, username: &str) {
        self.sync_dropdown();
        self.cursor = self.query_len();
        self.repo_list_state = ListState::default();
        self.search.search(username);
    }

    /// Puts `username` into the input and loads it, as when picking a saved profile.
    pub fn load_profile(&mut self, username: &str) {
        self.set_query(username);
        self.submit(username);
    }

    /// Feeds a suggestion fetch result to the controller.
    pub fn apply_suggestions(&mut self, update: SuggestionUpdate) {
        if self.suggestions.apply(update) {
            self.sync_dropdown();
        }
    }

    /// Feeds a profile fetch result to the orchestrator.
    ///
    /// When the input still names the loaded profile it is rewritten to the
    /// canonical username; anything the user typed since is left alone.
    pub fn apply_fetch(&mut self, update: FetchUpdate) {
        if !self.search.apply(update) {
            return;
        }
        let canonical = self.search.current_username().map(str::to_owned);
        if let Some(name) = canonical {
            if fold(self.suggestions.query()) == fold(&name) && self.suggestions.query() != name {
                self.set_query(&name);
            }
            if self
                .search
                .state()
                .result
                .as_ref()
                .is_some_and(|b| !b.repositories.is_empty())
            {
                self.repo_list_state.select(Some(0));
            }
        }
    }

    /// Resets input, result and error to the state before any search.
    pub fn clear_search(&mut self) {
        self.suggestions.clear();
        self.search.reset();
        self.cursor = 0;
        self.repo_list_state = ListState::default();
        self.dropdown_state = ListState::default();
        debug!("search cleared");
    }

    /// Mirrors the controller's selection into the dropdown list widget.
    pub fn sync_dropdown(&mut self) {
        let state = self.suggestions.state();
        if !state.visible {
            self.dropdown_state = ListState::default();
        } else {
            self.dropdown_state.select(state.selected);
        }
    }

    // -----------------------------------------------------------------------
    // Saved profiles
    // -----------------------------------------------------------------------

    /// Saves the displayed profile, or asks to remove it if it is already saved.
    pub fn toggle_save_current(&mut self) {
        let Some(name) = self.search.current_username().map(str::to_owned) else {
            return;
        };
        if self.saved.is_saved(&name) {
            self.request_remove(&name);
        } else if self.saved.add(&name) && self.saved_list_state.selected().is_none() {
            self.saved_list_state.select(Some(0));
        }
    }

    /// Username under the saved-list cursor.
    pub fn selected_saved(&self) -> Option<String> {
        let index = self.saved_list_state.selected()?;
        self.saved.profiles().get(index).map(|u| u.to_string())
    }

    /// Opens the confirmation dialog for removing `username`.
    pub fn request_remove(&mut self, username: &str) {
        if !self.saved.is_saved(username) {
            return;
        }
        self.confirm_target = Some(username.to_owned());
        self.mode = Mode::ConfirmRemove;
    }

    /// Removes the profile the dialog asked about and closes the dialog.
    ///
    /// The undo offer itself arrives with the `ProfileRemoved` notification.
    pub fn confirm_remove(&mut self) {
        self.mode = Mode::Normal;
        let Some(name) = self.confirm_target.take() else {
            return;
        };
        self.saved.remove(&name);
        self.clamp_saved_selection();
    }

    pub fn cancel_remove(&mut self) {
        self.confirm_target = None;
        self.mode = Mode::Normal;
    }

    /// Whether `u` / `Ctrl-z` would currently do anything.
    pub fn undo_available(&self, now: Instant) -> bool {
        self.last_removal
            .as_ref()
            .is_some_and(|p| now < p.expires_at)
    }

    /// Restores the most recent removal if its undo window is still open.
    ///
    /// Returns `true` when the profile came back.
    pub fn undo_last_removal(&mut self, now: Instant) -> bool {
        if !self.undo_available(now) {
            return false;
        }
        let Some(pending) = self.last_removal.take() else {
            return false;
        };
        self.toasts.withdraw_undo();
        let restored = self.saved.undo(&pending.username, pending.token);
        if restored && self.saved_list_state.selected().is_none() {
            self.saved_list_state.select(Some(0));
        }
        restored
    }

    fn clamp_saved_selection(&mut self) {
        let len = self.saved.len();
        match self.saved_list_state.selected() {
            _ if len == 0 => self.saved_list_state.select(None),
            Some(i) if i >= len => self.saved_list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Notifications and time
    // -----------------------------------------------------------------------

    /// Shows a toast for `notification` and records undo offers.
    pub fn on_notification(&mut self, notification: Notification, now: Instant) {
        let min_life = match &notification {
            Notification::ProfileRemoved { username, token } => {
                self.last_removal = Some(PendingUndo {
                    username: username.clone(),
                    token: *token,
                    expires_at: deadline(now, self.undo_window),
                });
                self.undo_window
            }
            _ => Duration::ZERO,
        };
        self.toasts.push(&notification, now, min_life);
    }

    /// Expires toasts and the undo offer.
    pub fn tick(&mut self, now: Instant) {
        self.toasts.expire(now);
        if self.last_removal.is_some() && !self.undo_available(now) {
            self.last_removal = None;
            self.toasts.withdraw_undo();
        }
    }

    // -----------------------------------------------------------------------
    // Focus and lists
    // -----------------------------------------------------------------------

    /// Moves focus, opening or closing the dropdown as the input gains or loses it.
    pub fn set_focus(&mut self, focus: PanelFocus) {
        if focus == self.focus {
            return;
        }
        if focus == PanelFocus::Search {
            self.suggestions.on_focus();
        } else {
            self.suggestions.on_blur_outside();
        }
        self.focus = focus;
        self.sync_dropdown();
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn focus_prev(&mut self) {
        self.set_focus(self.focus.prev());
    }

    /// Moves the cursor of the focused list down by `rows`.
    pub fn scroll_down(&mut self, rows: u16) {
        match self.focus {
            PanelFocus::Repositories => self.repo_list_state.scroll_down_by(rows),
            PanelFocus::Saved => self.saved_list_state.scroll_down_by(rows),
            PanelFocus::Search => {}
        }
        self.clamp_lists();
    }

    /// Moves the cursor of the focused list up by `rows`.
    pub fn scroll_up(&mut self, rows: u16) {
        match self.focus {
            PanelFocus::Repositories => self.repo_list_state.scroll_up_by(rows),
            PanelFocus::Saved => self.saved_list_state.scroll_up_by(rows),
            PanelFocus::Search => {}
        }
        self.clamp_lists();
    }

    pub fn scroll_top(&mut self) {
        match self.focus {
            PanelFocus::Repositories => self.repo_list_state.select_first(),
            PanelFocus::Saved => self.saved_list_state.select_first(),
            PanelFocus::Search => {}
        }
        self.clamp_lists();
    }

    pub fn scroll_bottom(&mut self) {
        let repos = self.repository_count();
        let saved = self.saved.len();
        match self.focus {
            PanelFocus::Repositories if repos > 0 => self.repo_list_state.select(Some(repos - 1)),
            PanelFocus::Saved if saved > 0 => self.saved_list_state.select(Some(saved - 1)),
            _ => {}
        }
    }

    /// Puts the repository cursor on `index`, clamped to the list.
    pub fn select_repository(&mut self, index: usize) {
        self.repo_list_state.select(Some(index));
        self.clamp_lists();
    }

    fn repository_count(&self) -> usize {
        self.search
            .state()
            .result
            .as_ref()
            .map_or(0, |b| b.repositories.len())
    }

    /// `ListState` selection can run past the end before the next render
    /// clamps it; clamp eagerly so `selected_saved` stays meaningful.
    fn clamp_lists(&mut self) {
        let repos = self.repository_count();
        if repos == 0 {
            self.repo_list_state.select(None);
        } else if self.repo_list_state.selected().is_some_and(|i| i >= repos) {
            self.repo_list_state.select(Some(repos - 1));
        }
        self.clamp_saved_selection();
    }

    /// Cancels background work before exit.
    pub fn shutdown(&mut self) {
        self.suggestions.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use octoscope_core::kv::MemoryKvStore;
    use octoscope_core::mock::MockProfileService;
    use octoscope_core::notify::NotificationSink;
    use octoscope_core::Reply;
    use tokio::sync::mpsc;

    const UNDO: Duration = Duration::from_secs(5);

    struct Harness {
        state: AppState,
        fetches: mpsc::UnboundedReceiver<FetchUpdate>,
        notices: Arc<Mutex<Vec<Notification>>>,
    }

    impl Harness {
        fn new(saved: &[&str]) -> Self {
            Self::with_undo_window(saved, UNDO)
        }

        fn with_undo_window(saved: &[&str], undo_window: Duration) -> Self {
            let service = MockProfileService::new(Duration::ZERO, Duration::ZERO).shared();
            let (tx, fetches) = mpsc::unbounded_channel();
            let fetch_reply: Reply<FetchUpdate> = Arc::new(move |u| {
                let _ = tx.send(u);
            });
            let suggest_reply: Reply<SuggestionUpdate> = Arc::new(|_| {});
            let notices = Arc::new(Mutex::new(Vec::new()));
            let captured = Arc::clone(&notices);
            let sink: Arc<dyn NotificationSink> =
                Arc::new(move |n: Notification| captured.lock().unwrap().push(n));

            let json = serde_json_list(saved);
            let kv = MemoryKvStore::with_entry(octoscope_core::saved::SAVED_PROFILES_KEY, &json);
            let store = SavedProfileStore::load(Box::new(kv), Arc::clone(&sink));
            let state = AppState::new(
                SuggestionController::new(Arc::clone(&service), suggest_reply, Duration::from_millis(300)),
                SearchOrchestrator::new(service, fetch_reply, sink, None),
                store,
                Duration::from_secs(4),
                undo_window,
            );
            Self {
                state,
                fetches,
                notices,
            }
        }

        /// Hands every notification emitted so far to the state.
        fn deliver(&mut self, now: Instant) {
            let pending: Vec<_> = self.notices.lock().unwrap().drain(..).collect();
            for n in pending {
                self.state.on_notification(n, now);
            }
        }
    }

    fn serde_json_list(names: &[&str]) -> String {
        let quoted: Vec<String> = names.iter().map(|n| format!("\"{n}\"")).collect();
        format!("[{}]", quoted.join(","))
    }

    fn saved_names(state: &AppState) -> Vec<String> {
        state.saved.profiles().iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut focus = PanelFocus::default();
        for _ in 0..3 {
            focus = focus.next();
        }
        assert_eq!(focus, PanelFocus::Search);
        assert_eq!(PanelFocus::Search.prev(), PanelFocus::Saved);
    }

    #[tokio::test(start_paused = true)]
    async fn typing_edits_at_the_cursor() {
        let mut h = Harness::new(&[]);
        for c in "octcat".chars() {
            h.state.input_char(c);
        }
        for _ in 0..3 {
            h.state.cursor_left();
        }
        h.state.input_char('o');
        assert_eq!(h.state.suggestions.query(), "octocat");
        assert_eq!(h.state.cursor, 4);

        h.state.cursor_home();
        h.state.input_delete();
        h.state.cursor_end();
        h.state.input_backspace();
        assert_eq!(h.state.suggestions.query(), "ctoca");
        assert_eq!(h.state.cursor, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn loaded_profile_rewrites_the_input_to_its_canonical_name() {
        let mut h = Harness::new(&[]);
        for c in "OctoCat".chars() {
            h.state.input_char(c);
        }
        h.state.submit("OctoCat");
        let update = h.fetches.recv().await.unwrap();
        h.state.apply_fetch(update);

        assert_eq!(h.state.suggestions.query(), "octocat");
        assert_eq!(h.state.repo_list_state.selected(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn typing_during_a_fetch_is_not_overwritten() {
        let mut h = Harness::new(&[]);
        h.state.load_profile("octocat");
        h.state.input_char('x');
        let update = h.fetches.recv().await.unwrap();
        h.state.apply_fetch(update);

        assert_eq!(h.state.suggestions.query(), "octocatx");
        assert_eq!(h.state.search.current_username(), Some("octocat"));
    }

    #[tokio::test(start_paused = true)]
    async fn toggling_save_on_a_saved_profile_asks_first() {
        let mut h = Harness::new(&["octocat"]);
        h.state.load_profile("octocat");
        let update = h.fetches.recv().await.unwrap();
        h.state.apply_fetch(update);

        h.state.toggle_save_current();
        assert_eq!(h.state.mode, Mode::ConfirmRemove);
        assert_eq!(h.state.confirm_target.as_deref(), Some("octocat"));
        assert_eq!(saved_names(&h.state), ["octocat"], "nothing removed yet");

        h.state.cancel_remove();
        assert_eq!(h.state.mode, Mode::Normal);
        assert_eq!(saved_names(&h.state), ["octocat"]);
    }

    #[tokio::test(start_paused = true)]
    async fn toggling_save_on_an_unsaved_profile_saves_it() {
        let mut h = Harness::new(&[]);
        h.state.load_profile("tj");
        let update = h.fetches.recv().await.unwrap();
        h.state.apply_fetch(update);

        h.state.toggle_save_current();
        assert_eq!(saved_names(&h.state), ["tj"]);
        assert_eq!(h.state.saved_list_state.selected(), Some(0));
        assert_eq!(h.state.mode, Mode::Normal);
    }

    #[test]
    fn confirmed_removal_can_be_undone_inside_the_window() {
        let mut h = Harness::new(&["tj", "wesbos"]);
        let now = Instant::now();

        h.state.saved_list_state.select(Some(1));
        h.state.request_remove("wesbos");
        h.state.confirm_remove();
        h.deliver(now);
        assert_eq!(saved_names(&h.state), ["tj"]);
        assert_eq!(h.state.saved_list_state.selected(), Some(0));
        assert!(h.state.undo_available(now));
        assert!(h.state.toasts.iter().any(|t| t.offers_undo));

        assert!(h.state.undo_last_removal(now + Duration::from_secs(2)));
        assert_eq!(saved_names(&h.state), ["tj", "wesbos"]);
        assert!(h.state.last_removal.is_none());
        assert!(!h.state.toasts.iter().any(|t| t.offers_undo));
    }

    #[test]
    fn undo_offer_expires_with_the_window() {
        let mut h = Harness::new(&["tj"]);
        let now = Instant::now();

        h.state.request_remove("tj");
        h.state.confirm_remove();
        h.deliver(now);

        h.state.tick(now + UNDO);
        assert!(h.state.last_removal.is_none());
        assert!(!h.state.undo_last_removal(now + UNDO));
        assert!(h.state.saved.is_empty());
    }

    #[test]
    fn huge_undo_window_does_not_overflow() {
        let mut h = Harness::with_undo_window(&["tj"], Duration::from_secs(u64::MAX));
        let now = Instant::now();

        h.state.request_remove("tj");
        h.state.confirm_remove();
        h.deliver(now);
        h.state.tick(now + Duration::from_secs(3600));
        assert!(h.state.undo_available(now + Duration::from_secs(3600)));
        assert!(h.state.undo_last_removal(now + Duration::from_secs(3600)));
        assert_eq!(saved_names(&h.state), ["tj"]);
    }

    #[test]
    fn remove_request_for_unsaved_name_is_ignored() {
        let mut h = Harness::new(&["tj"]);
        h.state.request_remove("nobody");
        assert_eq!(h.state.mode, Mode::Normal);
        assert!(h.state.confirm_target.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_search_resets_everything() {
        let mut h = Harness::new(&[]);
        h.state.load_profile("octocat");
        let update = h.fetches.recv().await.unwrap();
        h.state.apply_fetch(update);

        h.state.clear_search();
        assert_eq!(h.state.suggestions.query(), "");
        assert_eq!(h.state.cursor, 0);
        assert!(h.state.search.state().result.is_none());
        assert!(!h.state.search.state().has_searched);
        assert_eq!(h.state.repo_list_state.selected(), None);
    }

    #[test]
    fn list_cursor_stays_in_bounds() {
        let mut h = Harness::new(&["a", "b"]);
        h.state.set_focus(PanelFocus::Saved);
        h.state.scroll_down(5);
        assert_eq!(h.state.selected_saved().as_deref(), Some("b"));
        h.state.scroll_top();
        assert_eq!(h.state.selected_saved().as_deref(), Some("a"));
    }
}
