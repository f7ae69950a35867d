//! astrochat — terminal client for an astrology consultation chat.
//!
//! Entry point for the `astrochat` binary. Wires together configuration
//! (`config`), file logging (`logging`), the session store from `astrochat-core`,
//! the terminal lifecycle (`tui`), the event bus (`event`), and rendering (`ui`).
//!
//! # Startup sequence
//!
//! 1. Load config and start logging. Both happen before the terminal is touched so
//!    a bad seed or replay file can be reported on a normal screen.
//! 2. Build the store: seed from config or the built-in demo, then replay.
//! 3. `install_panic_hook()` so a panic restores the terminal first.
//! 4. `register_sigterm()`, polled by the 50 ms heartbeat.
//! 5. `init_tui()` and `spawn_event_task()`.
//!
//! After the loop exits, `restore_tui()` runs on every path; draw errors break out
//! of the loop instead of returning through `?`.

mod app;
mod config;
mod event;
mod logging;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;
use std::time::Instant;

use astrochat_core::{script, seed, ChatStore, LoadError};

use crate::ui::keybindings::{self, KeyAction};

/// Builds the session store from the configured seed and replay script.
fn build_store(config: &config::Config) -> Result<ChatStore, LoadError> {
    let messages = match &config.seed {
        Some(path) => seed::load_seed(path)?,
        None => seed::default_seed(),
    };
    let mut store = ChatStore::new(messages);

    if let Some(path) = &config.replay {
        let actions = script::load_actions(path)?;
        tracing::info!(path = %path.display(), count = actions.len(), "replaying action script");
        store.replay(actions)?;
    }
    Ok(store)
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let (config, config_warning) = config::load();
    logging::init(&config.log_file)?;
    if let Some(warning) = config_warning {
        tracing::warn!("{warning}");
    }
    tracing::info!(theme = %config.theme, "starting astrochat");

    let theme = theme::Theme::from_name(&config.theme);
    let store = build_store(&config).map_err(|e| {
        tracing::error!(error = %e, "failed to build session");
        std::io::Error::other(e)
    })?;
    let mut state = app::AppState::new(store);

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    let mut result = Ok(());

    'event_loop: loop {
        tokio::select! {
            // Heartbeat: a quiet terminal must still notice SIGTERM.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    tracing::info!("SIGTERM received");
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            tracing::error!(error = %e, "draw failed");
                            result = Err(e);
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if keybindings::handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        keybindings::handle_mouse(mouse, &mut state);
                    }
                    Some(event::AppEvent::Paste(text)) => {
                        keybindings::handle_paste(&text, &mut state);
                    }
                    Some(event::AppEvent::Tick) => state.expire_notice(Instant::now()),
                    // ratatui picks up the new size from frame.area() on the next Render.
                    Some(event::AppEvent::Resize(_, _)) => {}
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                state.sync_with_store();
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui()?;
    let chat = state.chat();
    tracing::info!(
        messages = chat.messages.len(),
        rating = chat.rating,
        "session ended"
    );
    result
}
