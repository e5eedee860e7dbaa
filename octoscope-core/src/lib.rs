//! Core logic for octoscope, a terminal profile browser.
//!
//! Everything here is independent of the terminal: the binary crate feeds
//! user intents into the three stateful components and renders what they
//! expose.
//!
//! - [`suggest::SuggestionController`]: debounced, stale-safe username
//!   suggestions with a keyboard cursor.
//! - [`saved::SavedProfileStore`]: persisted bookmark list with token-checked
//!   undo.
//! - [`search::SearchOrchestrator`]: turns a confirmed username into a
//!   loaded profile, a loading flag, or an error.
//!
//! All three talk to a [`service::ProfileService`]; the only implementation
//! shipped today is [`mock::MockProfileService`].

pub mod db;
pub mod error;
pub mod kv;
pub mod mock;
pub mod notify;
pub mod saved;
pub mod schema;
pub mod search;
pub mod service;
pub mod suggest;
pub mod types;

use std::sync::Arc;

/// Callback used by background tasks to hand a completion back to the owner
/// of the state it belongs to.
///
/// The binary wraps its event-bus sender in one of these; tests wrap a plain
/// channel. The callback must not block.
pub type Reply<T> = Arc<dyn Fn(T) + Send + Sync>;
