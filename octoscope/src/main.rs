//! octoscope: browse GitHub-style user profiles from the terminal.
//!
//! Entry point for the `octoscope` binary. Wires together the terminal
//! lifecycle (`tui`), the unified event bus (`event`), configuration and
//! logging, and the core components from `octoscope-core`.
//!
//! # Startup sequence
//!
//! 1. Load config and start file logging; both are safe before terminal init.
//! 2. Open the saved-profiles database, falling back to memory on failure.
//! 3. `install_panic_hook()` so a panic restores the terminal first.
//! 4. `register_sigterm()` for the flag polled in the event loop.
//! 5. Build the core components around reply callbacks into the event bus.
//! 6. `init_tui()`, spawn the input/timer task, run the loop.
//!
//! `restore_tui()` runs once after the loop exits, whatever ended it.

mod app;
mod config;
mod event;
mod logging;
mod theme;
mod toast;
mod tui;
mod ui;

use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use octoscope_core::db::SqliteKvStore;
use octoscope_core::kv::{MemoryKvStore, PersistentKeyValueStore};
use octoscope_core::mock::MockProfileService;
use octoscope_core::saved::SavedProfileStore;
use octoscope_core::search::SearchOrchestrator;
use octoscope_core::suggest::SuggestionController;
use tracing::{error, info, warn};

use crate::app::AppState;
use crate::config::Config;
use crate::event::{AppEvent, EventHandler};
use crate::theme::Theme;
use crate::ui::keybindings::{handle_key, handle_mouse, KeyAction};

/// Opens the SQLite store under `dir`, or an in-memory one if that fails.
///
/// Saved profiles then only live as long as the process; nothing is surfaced
/// to the user beyond the log.
fn open_store(dir: &Path) -> Box<dyn PersistentKeyValueStore> {
    let path = dir.join("octoscope.db");
    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!(error = %e, dir = %dir.display(), "data dir unavailable, saved profiles will not persist");
        return Box::new(MemoryKvStore::new());
    }
    match SqliteKvStore::open(&path) {
        Ok(store) => {
            info!(path = %path.display(), "saved profiles database opened");
            Box::new(store)
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "database unavailable, saved profiles will not persist");
            Box::new(MemoryKvStore::new())
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Step 1: config and logging. A broken config is reported once logging works.
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let data_dir = config.data_dir();
    let log_path = match logging::init(&data_dir, &config.log_level) {
        Ok(path) => Some(path),
        Err(e) => {
            eprintln!("octoscope: logging disabled: {e}");
            None
        }
    };
    if let Some(e) = config_error {
        warn!(error = %e, "config ignored, using defaults");
    }
    info!(
        version = env!("CARGO_PKG_VERSION"),
        log = ?log_path,
        "starting"
    );

    let theme = Theme::from_name(&config.theme);

    // Step 2: persistence.
    let kv = open_store(&data_dir);

    // Step 3 + 4: panic hook first, then the SIGTERM flag.
    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;

    // Step 5: core components. Every completion comes back through the bus.
    let handler = EventHandler::new();
    let service = MockProfileService::new(config.search_latency(), config.fetch_latency()).shared();
    let saved = SavedProfileStore::load(kv, handler.notification_sink());
    let suggestions = SuggestionController::new(
        Arc::clone(&service),
        handler.suggestion_reply(),
        config.debounce(),
    );
    let search = SearchOrchestrator::new(
        service,
        handler.profile_reply(),
        handler.notification_sink(),
        config.fetch_timeout(),
    );
    let mut state = AppState::new(
        suggestions,
        search,
        saved,
        config.toast_ttl(),
        config.undo_window(),
    );

    // Step 6: terminal, input task, loop.
    let mut terminal = tui::init_tui()?;
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    // Exits only via `break`, so `restore_tui()` below is always reached.
    let mut outcome = Ok(());
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: SIGTERM is checked at least every 50ms even when no
            // events arrive.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    info!("SIGTERM received");
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                let now = Instant::now();
                match maybe_event {
                    Some(AppEvent::Render) => {
                        // Exactly one draw() call per Render event, never elsewhere.
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme, now)) {
                            error!(error = %e, "draw failed");
                            outcome = Err(e);
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Key(key)) => {
                        if handle_key(key, &mut state, now) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Mouse(mouse)) => {
                        if handle_mouse(mouse, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    // The next Render picks up the new size from frame.area().
                    Some(AppEvent::Resize(_, _)) => {}
                    Some(AppEvent::Tick) => state.tick(now),
                    Some(AppEvent::Suggestions(update)) => state.apply_suggestions(update),
                    Some(AppEvent::Profile(update)) => state.apply_fetch(*update),
                    Some(AppEvent::Notice(notification)) => state.on_notification(notification, now),
                    Some(AppEvent::Quit) | None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    info!("SIGTERM received");
                    break 'event_loop;
                }
            }
        }
    }

    state.shutdown();
    tui::restore_tui()?;
    info!("exiting");
    outcome
}
