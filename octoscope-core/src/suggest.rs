//! Debounced username suggestions with a keyboard cursor.
//!
//! Every keystroke bumps a generation counter and replaces the pending
//! debounce task. The task sleeps for the quiet period, calls
//! [`ProfileService::search`], and hands the result back tagged with the
//! generation it was scheduled under. [`SuggestionController::apply`] drops
//! anything whose generation is no longer current, so a slow response for an
//! old query can never overwrite the list for a newer one.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::ServiceError;
use crate::service::ProfileService;
use crate::types::ProfileSummary;
use crate::Reply;

/// Quiet period between the last keystroke and the suggestion fetch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// What the suggestion dropdown shows.
///
/// `selected` is always `None` or a valid index into `items`, and `visible`
/// is never `true` while `items` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionState {
    pub query: String,
    pub items: Vec<ProfileSummary>,
    pub selected: Option<usize>,
    pub visible: bool,
}

/// Keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKey {
    Up,
    Down,
    Enter,
    Escape,
}

/// Result of [`SuggestionController::on_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Search for this username now.
    Search(String),
    /// The key changed suggestion state.
    Handled,
    /// The key means nothing to the dropdown in its current state.
    Ignored,
}

/// A finished suggestion fetch, on its way back to the controller.
#[derive(Debug)]
pub struct SuggestionUpdate {
    generation: u64,
    query: String,
    outcome: Result<Vec<ProfileSummary>, ServiceError>,
}

impl SuggestionUpdate {
    /// The query this fetch was issued for.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Owner of [`SuggestionState`].
pub struct SuggestionController {
    state: SuggestionState,
    service: Arc<dyn ProfileService>,
    reply: Reply<SuggestionUpdate>,
    debounce: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    closed: bool,
}

impl SuggestionController {
    pub fn new(
        service: Arc<dyn ProfileService>,
        reply: Reply<SuggestionUpdate>,
        debounce: Duration,
    ) -> Self {
        Self {
            state: SuggestionState::default(),
            service,
            reply,
            debounce,
            generation: 0,
            pending: None,
            closed: false,
        }
    }

    pub fn state(&self) -> &SuggestionState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.state.query
    }

    /// The currently highlighted suggestion, if any.
    pub fn selected_item(&self) -> Option<&ProfileSummary> {
        self.state.selected.and_then(|i| self.state.items.get(i))
    }

    /// Records a new query and (re)schedules the debounced fetch.
    ///
    /// A blank query clears the list immediately and nothing is scheduled.
    /// Must be called from within a tokio runtime.
    pub fn on_input(&mut self, query: impl Into<String>) {
        if self.closed {
            return;
        }
        self.state.query = query.into();
        self.state.selected = None;
        self.invalidate();

        if self.state.query.trim().is_empty() {
            self.hide_and_clear();
            return;
        }

        let generation = self.generation;
        let query = self.state.query.clone();
        let service = Arc::clone(&self.service);
        let reply = Arc::clone(&self.reply);
        let debounce = self.debounce;
        debug!(generation, query = %query, "suggestion fetch scheduled");

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let outcome = service.search(&query).await;
            reply(SuggestionUpdate {
                generation,
                query,
                outcome,
            });
        }));
    }

    /// Applies a finished fetch. Returns `false` when the update was stale and
    /// therefore dropped.
    pub fn apply(&mut self, update: SuggestionUpdate) -> bool {
        if self.closed || update.generation != self.generation {
            debug!(
                generation = update.generation,
                current = self.generation,
                query = %update.query,
                "stale suggestions dropped"
            );
            return false;
        }
        self.pending = None;
        self.state.selected = None;
        match update.outcome {
            Ok(items) => {
                self.state.visible = !items.is_empty();
                self.state.items = items;
            }
            Err(e) => {
                debug!(error = %e, query = %update.query, "suggestion fetch failed");
                self.hide_and_clear();
            }
        }
        true
    }

    /// Keyboard handling for the input while the dropdown may be open.
    pub fn on_key(&mut self, key: SuggestionKey) -> KeyOutcome {
        let open = self.state.visible && !self.state.items.is_empty();
        if !open {
            return match key {
                SuggestionKey::Enter => self.submit_raw(),
                _ => KeyOutcome::Ignored,
            };
        }

        let last = self.state.items.len() - 1;
        match key {
            SuggestionKey::Down => {
                self.state.selected = Some(match self.state.selected {
                    Some(i) if i < last => i + 1,
                    _ => 0,
                });
                KeyOutcome::Handled
            }
            SuggestionKey::Up => {
                self.state.selected = Some(match self.state.selected {
                    Some(i) if i > 0 => i - 1,
                    _ => last,
                });
                KeyOutcome::Handled
            }
            SuggestionKey::Enter => match self.selected_item().cloned() {
                Some(item) => KeyOutcome::Search(self.resolve_selection(&item)),
                None => self.submit_raw(),
            },
            SuggestionKey::Escape => {
                self.state.visible = false;
                self.state.selected = None;
                KeyOutcome::Handled
            }
        }
    }

    /// Confirms `item`: the query becomes its username, the dropdown closes,
    /// and the username to search for is returned.
    pub fn resolve_selection(&mut self, item: &ProfileSummary) -> String {
        self.invalidate();
        self.state.query = item.username.clone();
        self.hide_and_clear();
        debug!(username = %item.username, "suggestion resolved");
        item.username.clone()
    }

    /// Pointer click on the suggestion at `index`.
    pub fn on_suggestion_click(&mut self, index: usize) -> Option<String> {
        if !self.state.visible {
            return None;
        }
        let item = self.state.items.get(index)?.clone();
        Some(self.resolve_selection(&item))
    }

    /// Pointer hover over the suggestion at `index` moves the cursor there.
    pub fn on_hover(&mut self, index: usize) {
        if self.state.visible && index < self.state.items.len() {
            self.state.selected = Some(index);
        }
    }

    /// The input regained focus: reopen the dropdown if it still has content.
    pub fn on_focus(&mut self) {
        if !self.state.query.trim().is_empty() && !self.state.items.is_empty() {
            self.state.visible = true;
        }
    }

    /// A pointer event landed outside the input and the dropdown.
    pub fn on_blur_outside(&mut self) {
        self.state.visible = false;
        self.state.selected = None;
    }

    /// Replaces the query without fetching suggestions, e.g. when a profile is
    /// loaded from elsewhere.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.invalidate();
        self.state.query = query.into();
        self.hide_and_clear();
    }

    /// Empties the query and the dropdown.
    pub fn clear(&mut self) {
        self.set_query(String::new());
    }

    /// Cancels any pending fetch. Nothing is scheduled or applied afterwards.
    pub fn shutdown(&mut self) {
        self.invalidate();
        self.closed = true;
    }

    fn submit_raw(&mut self) -> KeyOutcome {
        self.invalidate();
        self.state.visible = false;
        self.state.selected = None;
        KeyOutcome::Search(self.state.query.clone())
    }

    /// Makes every outstanding fetch stale and aborts the pending one.
    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    fn hide_and_clear(&mut self) {
        self.state.items.clear();
        self.state.selected = None;
        self.state.visible = false;
    }
}

impl Drop for SuggestionController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
