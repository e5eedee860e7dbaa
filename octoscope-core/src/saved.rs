//! Bookmarked usernames with reversible removal.
//!
//! Per-username lifecycle:
//!
//! ```text
//! Unsaved --add--> Saved --remove(T)--> PendingUndo --undo(T)--> Saved
//!                                            |
//!                                            +-- superseded / abandoned --> Unsaved
//! ```
//!
//! The store has no clock. Whether an undo offer is still shown is up to the
//! caller; correctness depends only on token comparison.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::kv::PersistentKeyValueStore;
use crate::notify::{Notification, NotificationSink, UndoToken};
use crate::types::Username;

/// Key under which the saved list is persisted.
pub const SAVED_PROFILES_KEY: &str = "saved_profiles";

/// Ordered, case-insensitively unique list of bookmarked usernames.
///
/// Every mutation writes the full candidate list before touching memory. If
/// the write fails the call is a no-op, so the in-memory list and the stored
/// snapshot never diverge.
pub struct SavedProfileStore {
    kv: Box<dyn PersistentKeyValueStore>,
    sink: Arc<dyn NotificationSink>,
    profiles: Vec<Username>,
    /// Latest removal per folded username.
    pending: HashMap<String, (Username, UndoToken)>,
}

impl SavedProfileStore {
    /// Reads the persisted list. Missing, unreadable, or malformed data yields
    /// an empty list; this never fails.
    pub fn load(kv: Box<dyn PersistentKeyValueStore>, sink: Arc<dyn NotificationSink>) -> Self {
        let profiles = match kv.get(SAVED_PROFILES_KEY) {
            Ok(Some(raw)) => decode(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "saved profiles unreadable, starting empty");
                Vec::new()
            }
        };
        debug!(count = profiles.len(), "saved profiles loaded");
        Self {
            kv,
            sink,
            profiles,
            pending: HashMap::new(),
        }
    }

    /// Saved usernames in insertion order.
    pub fn profiles(&self) -> &[Username] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Case-insensitive membership test.
    pub fn is_saved(&self, username: &str) -> bool {
        self.profiles.iter().any(|p| p.matches(username))
    }

    /// Appends `username` unless it is blank or already saved.
    ///
    /// Returns `true` when the list changed.
    pub fn add(&mut self, username: &str) -> bool {
        let Some(name) = Username::parse(username) else {
            return false;
        };
        if self.is_saved(name.as_str()) {
            return false;
        }
        let mut next = self.profiles.clone();
        next.push(name.clone());
        if !self.commit(next) {
            return false;
        }
        info!(username = %name, "profile saved");
        self.sink.notify(Notification::ProfileSaved {
            username: name.to_string(),
        });
        true
    }

    /// Removes `username` if present and returns the token that can undo it.
    ///
    /// The token replaces any earlier token for the same username.
    pub fn remove(&mut self, username: &str) -> Option<UndoToken> {
        let index = self.profiles.iter().position(|p| p.matches(username))?;
        let mut next = self.profiles.clone();
        let removed = next.remove(index);
        if !self.commit(next) {
            return None;
        }

        let token = UndoToken::fresh();
        self.pending.insert(removed.key(), (removed.clone(), token));
        info!(username = %removed, "profile removed");
        self.sink.notify(Notification::ProfileRemoved {
            username: removed.to_string(),
            token,
        });
        Some(token)
    }

    /// Re-appends a removed username if `token` is still the latest one issued
    /// for it and the username has not been saved again since.
    ///
    /// Stale tokens are a silent no-op. Returns `true` when the list changed.
    pub fn undo(&mut self, username: &str, token: UndoToken) -> bool {
        let key = crate::types::fold(username);
        let Some((name, current)) = self.pending.get(&key).cloned() else {
            return false;
        };
        if current != token {
            debug!(username = %name, "undo ignored: token superseded");
            return false;
        }
        if self.is_saved(name.as_str()) {
            self.pending.remove(&key);
            return false;
        }

        let mut next = self.profiles.clone();
        next.push(name.clone());
        if !self.commit(next) {
            return false;
        }
        self.pending.remove(&key);
        info!(username = %name, "profile restored");
        self.sink.notify(Notification::ProfileRestored {
            username: name.to_string(),
        });
        true
    }

    /// Persists `next`; on success it becomes the in-memory list.
    fn commit(&mut self, next: Vec<Username>) -> bool {
        let encoded = encode(&next);
        match self.kv.set(SAVED_PROFILES_KEY, &encoded) {
            Ok(()) => {
                self.profiles = next;
                true
            }
            Err(e) => {
                warn!(error = %e, "saved profiles not persisted, change dropped");
                false
            }
        }
    }
}

/// Serializes the list as a JSON array of strings.
fn encode(profiles: &[Username]) -> String {
    let names: Vec<&str> = profiles.iter().map(Username::as_str).collect();
    // Serializing a slice of &str cannot fail.
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_owned())
}

/// Parses a persisted list, dropping blanks and case-insensitive duplicates.
///
/// Anything that is not a JSON array of strings is treated as no data.
fn decode(raw: &str) -> Vec<Username> {
    let names: Vec<String> = match serde_json::from_str(raw) {
        Ok(names) => names,
        Err(e) => {
            warn!(error = %e, "malformed saved profiles, starting empty");
            return Vec::new();
        }
    };
    let mut profiles: Vec<Username> = Vec::with_capacity(names.len());
    for name in names.iter().filter_map(|n| Username::parse(n)) {
        if !profiles.iter().any(|p| p.matches(name.as_str())) {
            profiles.push(name);
        }
    }
    profiles
}
