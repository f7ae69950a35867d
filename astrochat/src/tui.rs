//! Terminal lifecycle for astrochat.
//!
//! Raw mode, the alternate screen, mouse capture, and bracketed paste are switched
//! on together in [`init_tui`] and off together in [`restore_tui`].
//!
//! **Why stdout is safe here.**
//! Logging is routed to a file by `logging.rs` and never reaches the terminal, and
//! nothing else in the process prints. The UI therefore owns stdout outright; a
//! stray `println!` would corrupt the frame until the next full redraw.
//!
//! **Why mouse capture and bracketed paste.**
//! Right-click is the terminal stand-in for the long-press that opens the reaction
//! palette, and clicks select bubbles. Bracketed paste delivers a pasted block as a
//! single `Event::Paste` instead of a burst of key events, so a multi-line paste
//! cannot send half a message on its first newline.

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::SIGTERM;
use signal_hook::flag::register;
use std::io::{stdout, BufWriter, Stdout};
use std::panic;
use std::sync::{atomic::AtomicBool, Arc};

/// The terminal type used by astrochat: `CrosstermBackend` over buffered stdout.
///
/// `BufWriter<Stdout>` batches each frame's escape sequences into a few write(2)
/// calls, which keeps the 30 FPS redraw from flickering on slow terminals.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stdout>>>;

/// Puts the terminal into TUI mode.
///
/// Enables raw mode, enters the alternate screen, and turns on mouse capture and
/// bracketed paste. Call [`restore_tui`] at every exit path.
///
/// # Errors
///
/// Returns `Err` if `enable_raw_mode`, `execute!`, or `Terminal::new` fails.
pub fn init_tui() -> std::io::Result<Tui> {
    let mut out = BufWriter::new(stdout());
    enable_raw_mode()?;
    execute!(
        out,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    Terminal::new(CrosstermBackend::new(out))
}

/// Restores the terminal to its pre-TUI state.
///
/// Undoes [`init_tui`] in reverse order. Idempotent, and must run on every exit
/// path including the panic hook: ratatui 0.30 does not restore the terminal when
/// the `Terminal` is dropped.
///
/// # Errors
///
/// Returns `Err` if `disable_raw_mode` or `execute!` fails. The panic hook uses
/// `let _ = restore_tui();` and carries on.
pub fn restore_tui() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(
        stdout(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before the panic message prints.
///
/// Must be called **before** [`init_tui`]. Chains onto the previous hook so the
/// default printer still runs, after the terminal is back in cooked mode and the
/// panic is also recorded in the log file. Without it a panic leaves the shell in
/// raw mode on the alternate screen with the message invisible.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Best effort: we are already panicking.
        let _ = restore_tui();
        tracing::error!(%panic_info, "panic");
        original_hook(panic_info);
    }));
}

/// Registers a SIGTERM handler that sets an `AtomicBool` flag.
///
/// The returned flag flips from `false` to `true` when the process receives
/// SIGTERM. The main loop polls it on its 50 ms heartbeat and then leaves through
/// the same path as `q`, so the terminal is restored.
///
/// # Errors
///
/// Returns `Err` if the OS refuses to register the handler. Startup treats that as
/// fatal, before the terminal has been switched into raw mode.
pub fn register_sigterm() -> std::io::Result<Arc<AtomicBool>> {
    let term = Arc::new(AtomicBool::new(false));
    register(SIGTERM, Arc::clone(&term))?;
    Ok(term)
}
