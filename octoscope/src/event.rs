//! Event bus for octoscope.
//!
//! All user input, timer ticks, and background-task results are normalised into
//! a single `AppEvent` enum and sent over a tokio unbounded MPSC channel. The
//! main loop receives from this channel and dispatches accordingly, so every
//! piece of application state is mutated from one place.
//!
//! Two independent intervals drive the render and logic cycles:
//! - **Render interval** (33 ms ≈ 30 FPS) triggers a `terminal.draw()` call.
//! - **Tick interval** (250 ms = 4 Hz) expires toasts and undo offers.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use octoscope_core::notify::{Notification, NotificationSink};
use octoscope_core::search::FetchUpdate;
use octoscope_core::suggest::SuggestionUpdate;
use octoscope_core::Reply;
use tokio::sync::mpsc;
use tokio::time::interval;

/// All events the application can receive from any source.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    ///
    /// Release and repeat events are filtered in [`spawn_event_task`] to avoid
    /// double-firing on Windows, which synthesises both press and release for
    /// every keystroke.
    Key(KeyEvent),
    /// A mouse event from the terminal (click, scroll, move).
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Logic tick for time-based state (4 Hz / 250 ms).
    Tick,
    /// Render tick, triggers a `terminal.draw()` call (≈30 FPS / 33 ms).
    Render,
    /// A suggestion fetch finished.
    Suggestions(SuggestionUpdate),
    /// A profile fetch finished. Boxed, the bundle is large.
    Profile(Box<FetchUpdate>),
    /// The core emitted a user-visible notification.
    Notice(Notification),
    /// Quit signal.
    Quit,
}

/// Holds the sender and receiver ends of the unified event channel.
///
/// The sender (`tx`) is cloned into every reply callback handed to the core;
/// the receiver (`rx`) is owned by the main event loop.
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<AppEvent>,
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Reply callback delivering suggestion results onto the bus.
    pub fn suggestion_reply(&self) -> Reply<SuggestionUpdate> {
        let tx = self.tx.clone();
        Arc::new(move |update| {
            let _ = tx.send(AppEvent::Suggestions(update));
        })
    }

    /// Reply callback delivering profile fetch results onto the bus.
    pub fn profile_reply(&self) -> Reply<FetchUpdate> {
        let tx = self.tx.clone();
        Arc::new(move |update| {
            let _ = tx.send(AppEvent::Profile(Box::new(update)));
        })
    }

    /// Notification sink that turns every core notification into an event.
    pub fn notification_sink(&self) -> Arc<dyn NotificationSink> {
        let tx = self.tx.clone();
        Arc::new(move |notification: Notification| {
            let _ = tx.send(AppEvent::Notice(notification));
        })
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the background tokio task that feeds terminal input and timers into
/// the unified event channel.
///
/// The task exits once the receiver is gone and a send fails, or after
/// sending `Quit` when the terminal stream ends.
///
/// `reader.next().fuse()` keeps `tokio::select!` from polling a finished
/// stream if crossterm ever terminates it.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut tick_interval = interval(Duration::from_millis(250));
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let tick_tick = tick_interval.tick();
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            let sent = tokio::select! {
                _ = tick_tick => tx.send(AppEvent::Tick),
                _ = render_tick => tx.send(AppEvent::Render),
                maybe_event = crossterm_event => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        tx.send(AppEvent::Key(key))
                    }
                    Some(Ok(Event::Resize(w, h))) => tx.send(AppEvent::Resize(w, h)),
                    Some(Ok(Event::Mouse(mouse))) => tx.send(AppEvent::Mouse(mouse)),
                    Some(Ok(_)) => Ok(()),
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "terminal event stream error");
                        Ok(())
                    }
                    None => {
                        let _ = tx.send(AppEvent::Quit);
                        break;
                    }
                },
            };
            if sent.is_err() {
                break;
            }
        }
    });
}
