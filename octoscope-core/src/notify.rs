use uuid::Uuid;

/// Opaque marker issued by a removal and required again to undo it.
///
/// Each removal gets a fresh token; a later removal of the same username
/// supersedes the earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UndoToken(Uuid);

impl UndoToken {
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A user-visible event emitted by the core. Fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    ProfileLoaded { username: String },
    ProfileSaved { username: String },
    /// Carries the token a caller needs to offer undo.
    ProfileRemoved { username: String, token: UndoToken },
    ProfileRestored { username: String },
}

impl Notification {
    pub fn username(&self) -> &str {
        match self {
            Notification::ProfileLoaded { username }
            | Notification::ProfileSaved { username }
            | Notification::ProfileRemoved { username, .. }
            | Notification::ProfileRestored { username } => username,
        }
    }
}

/// Receiver of [`Notification`]s, e.g. a toast queue.
///
/// The core never inspects what the sink does with an event.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<F> NotificationSink for F
where
    F: Fn(Notification) + Send + Sync,
{
    fn notify(&self, notification: Notification) {
        self(notification)
    }
}
