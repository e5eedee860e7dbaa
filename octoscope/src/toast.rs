//! Transient notifications shown in the top-right corner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use octoscope_core::notify::Notification;

/// At most this many toasts are on screen; older ones are dropped first.
pub const MAX_TOASTS: usize = 3;

/// Upper bound on how far ahead a deadline is placed when the requested
/// lifetime does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// `now + life`, saturating at `FAR_FUTURE` when the sum overflows.
pub fn deadline(now: Instant, life: Duration) -> Instant {
    now.checked_add(life)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

/// Colour family of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub body: String,
    pub tone: Tone,
    /// Shows the undo hint while the matching removal can still be undone.
    pub offers_undo: bool,
    expires_at: Instant,
}

impl Toast {
    /// Builds the toast announcing `notification`.
    pub fn from_notification(notification: &Notification, expires_at: Instant) -> Self {
        let (title, body, tone) = match notification {
            Notification::ProfileLoaded { username } => (
                "Profile loaded",
                format!("Successfully loaded profile for {username}"),
                Tone::Success,
            ),
            Notification::ProfileSaved { username } => (
                "Profile saved",
                format!("{username} has been added to your saved profiles"),
                Tone::Success,
            ),
            Notification::ProfileRemoved { username, .. } => (
                "Profile removed",
                format!("{username} has been removed from your saved profiles"),
                Tone::Warning,
            ),
            Notification::ProfileRestored { username } => (
                "Profile restored",
                format!("{username} is back in your saved profiles"),
                Tone::Info,
            ),
        };
        Self {
            title: title.to_owned(),
            body,
            tone,
            offers_undo: matches!(notification, Notification::ProfileRemoved { .. }),
            expires_at,
        }
    }
}

/// Oldest-first queue of live toasts.
#[derive(Debug)]
pub struct ToastQueue {
    items: VecDeque<Toast>,
    ttl: Duration,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
        }
    }

    /// Queues a toast for `notification`, living for at least `min_life`.
    pub fn push(&mut self, notification: &Notification, now: Instant, min_life: Duration) {
        let toast = Toast::from_notification(notification, deadline(now, self.ttl.max(min_life)));
        if toast.offers_undo {
            self.withdraw_undo();
        }
        self.items.push_back(toast);
        while self.items.len() > MAX_TOASTS {
            self.items.pop_front();
        }
    }

    /// Drops every toast whose time is up.
    pub fn expire(&mut self, now: Instant) {
        self.items.retain(|t| t.expires_at > now);
    }

    /// Removes the undo hint from every toast.
    pub fn withdraw_undo(&mut self) {
        for toast in &mut self.items {
            toast.offers_undo = false;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use octoscope_core::kv::MemoryKvStore;
    use octoscope_core::notify::UndoToken;
    use octoscope_core::saved::SavedProfileStore;

    fn token() -> UndoToken {
        let mut store =
            SavedProfileStore::load(Box::new(MemoryKvStore::new()), Arc::new(|_: Notification| {}));
        store.add("someone");
        store.remove("someone").unwrap()
    }

    fn saved(name: &str) -> Notification {
        Notification::ProfileSaved {
            username: name.to_owned(),
        }
    }

    #[test]
    fn toasts_expire_after_their_ttl() {
        let now = Instant::now();
        let mut queue = ToastQueue::new(Duration::from_secs(4));
        queue.push(&saved("tj"), now, Duration::ZERO);

        queue.expire(now + Duration::from_secs(3));
        assert_eq!(queue.iter().count(), 1);
        queue.expire(now + Duration::from_secs(4));
        assert!(queue.is_empty());
    }

    #[test]
    fn oldest_toast_is_dropped_when_full() {
        let now = Instant::now();
        let mut queue = ToastQueue::new(Duration::from_secs(4));
        for name in ["a", "b", "c", "d"] {
            queue.push(&saved(name), now, Duration::ZERO);
        }
        let bodies: Vec<_> = queue.iter().map(|t| t.body.as_str()).collect();
        assert_eq!(bodies.len(), MAX_TOASTS);
        assert!(bodies[0].starts_with("b "));
    }

    #[test]
    fn only_the_newest_removal_offers_undo() {
        let now = Instant::now();
        let mut queue = ToastQueue::new(Duration::from_secs(4));
        let removed = |name: &str| Notification::ProfileRemoved {
            username: name.to_owned(),
            token: token(),
        };
        queue.push(&removed("tj"), now, Duration::from_secs(5));
        queue.push(&removed("wesbos"), now, Duration::from_secs(5));

        let offers: Vec<_> = queue.iter().map(|t| t.offers_undo).collect();
        assert_eq!(offers, [false, true]);
    }

    #[test]
    fn huge_configured_ttl_keeps_the_toast_alive() {
        let config: crate::config::Config =
            toml::from_str("toast_secs = 9223372036854775807").unwrap();
        let now = Instant::now();
        let mut queue = ToastQueue::new(config.toast_ttl());
        queue.push(&saved("tj"), now, Duration::ZERO);

        queue.expire(now + Duration::from_secs(3600));
        assert_eq!(queue.iter().count(), 1);
    }

    #[test]
    fn deadline_saturates_instead_of_overflowing() {
        let now = Instant::now();
        assert_eq!(deadline(now, Duration::from_secs(4)), now + Duration::from_secs(4));
        assert!(deadline(now, Duration::MAX) > now);
    }

    #[test]
    fn messages_name_the_profile() {
        let toast = Toast::from_notification(
            &Notification::ProfileLoaded {
                username: "octocat".into(),
            },
            Instant::now(),
        );
        assert_eq!(toast.title, "Profile loaded");
        assert_eq!(toast.body, "Successfully loaded profile for octocat");
        assert_eq!(toast.tone, Tone::Success);
        assert!(!toast.offers_undo);
    }
}
