//! Terminal lifecycle management for octoscope.
//!
//! The UI renders to stderr, so stdout stays clean for shell pipelines.

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::SIGTERM;
use signal_hook::flag::register;
use std::io::{stderr, BufWriter, Stderr};
use std::panic;
use std::sync::{atomic::AtomicBool, Arc};

/// The terminal type used by octoscope: CrosstermBackend over a buffered stderr writer.
///
/// `BufWriter<Stderr>` batches escape sequences into fewer write(2) syscalls,
/// reducing flicker at the 30 FPS render interval.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stderr>>>;

/// Initialise the terminal for TUI rendering.
///
/// Enables raw mode, enters the alternate screen and turns on mouse capture
/// (hover and click drive the suggestion dropdown). Call [`restore_tui`] at
/// every exit path.
///
/// # Errors
///
/// Returns `Err` if `enable_raw_mode`, `execute!`, or `Terminal::new` fails.
pub fn init_tui() -> std::io::Result<Tui> {
    let mut out = BufWriter::new(stderr());
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(out))
}

/// Restore the terminal to its pre-TUI state.
///
/// Idempotent. ratatui 0.30 does not restore the terminal on `Drop`, so this
/// runs at the single exit point of the event loop and inside the panic hook.
///
/// # Errors
///
/// Returns `Err` if `disable_raw_mode` or `execute!` fails. The panic hook
/// ignores the error.
pub fn restore_tui() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(stderr(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic message.
///
/// Must be called **before** [`init_tui`]. Chains onto the previously installed
/// hook so the default panic printer still runs, now on a usable terminal.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        tracing::error!(%panic_info, "panic");
        let _ = restore_tui();
        original_hook(panic_info);
    }));
}

/// Register a SIGTERM handler that sets an `AtomicBool` flag.
///
/// The returned flag flips to `true` when the process receives SIGTERM; the
/// main loop polls it on every event and on a 50 ms heartbeat.
///
/// # Errors
///
/// Returns `Err` if the OS refuses to register the handler.
pub fn register_sigterm() -> std::io::Result<Arc<AtomicBool>> {
    let term = Arc::new(AtomicBool::new(false));
    register(SIGTERM, Arc::clone(&term))?;
    Ok(term)
}
