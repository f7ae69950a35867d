//! Event bus for astrochat.
//!
//! Terminal input and timer ticks are normalised into a single `AppEvent` enum and
//! sent over a tokio unbounded MPSC channel. The main loop receives from this
//! channel and is the only place that touches `AppState`, so every store dispatch
//! happens on one task in arrival order.
//!
//! Two independent intervals drive the loop:
//! - **Render interval** (33 ms ≈ 30 FPS) triggers a `terminal.draw()` call.
//! - **Tick interval** (250 ms = 4 Hz) lets the loop drain store snapshots and
//!   expire status-bar notices (see `AppState::expire_notice`) even when no key is
//!   pressed.
//!
//! The two are independent so the frame rate can be tuned without changing how
//! often notices and snapshots are serviced.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// All events the application can receive.
///
/// Marked `#[non_exhaustive]` so that new event sources added later do not break
/// exhaustive matches in existing handlers.
#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// A key press (`KeyEventKind::Press` only).
    ///
    /// Release and repeat events are filtered in [`spawn_event_task`]; Windows
    /// reports both a press and a release for every keystroke, which would
    /// otherwise type each character twice.
    Key(KeyEvent),
    /// Click, right-click, or wheel.
    Mouse(MouseEvent),
    /// Bracketed paste into the compose line.
    Paste(String),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Logic tick (4 Hz / 250 ms).
    Tick,
    /// Render tick; triggers a `terminal.draw()` call (≈30 FPS / 33 ms).
    Render,
    /// The terminal event stream ended.
    Quit,
}

/// Holds the sender and receiver ends of the unified event channel.
pub struct EventHandler {
    /// Send half; clone this for each task that produces events.
    pub tx: mpsc::UnboundedSender<AppEvent>,
    /// Receive half; owned by the main loop, which awaits `.recv()`.
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Creates a new `EventHandler` with a fresh unbounded channel.
    ///
    /// The producers are the terminal and two timers, all bounded by hardware
    /// rates, and the consumer drains every event without blocking, so the queue
    /// does not grow.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the background task that feeds the event channel.
///
/// Runs until a send fails, which means the main loop dropped its receiver.
/// `reader.next().fuse()` keeps `select!` from polling a finished stream.
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
                    Some(Ok(Event::Mouse(mouse))) => tx.send(AppEvent::Mouse(mouse)),
                    Some(Ok(Event::Paste(text))) => tx.send(AppEvent::Paste(text)),
                    Some(Ok(Event::Resize(w, h))) => tx.send(AppEvent::Resize(w, h)),
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "terminal event stream error");
                        Ok(())
                    }
                    None => tx.send(AppEvent::Quit),
                    _ => Ok(()),
                },
            };
            if sent.is_err() {
                tracing::debug!("event receiver dropped; stopping event task");
                break;
            }
        }
    });
}
