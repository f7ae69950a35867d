//! Keybinding dispatcher for astrochat.
//!
//! Translates crossterm key and mouse events into `AppState` calls and returns a
//! `KeyAction` telling the event loop whether to continue or quit. Overlays the
//! store reports as open (rating modal, then reaction palette) take input before
//! the current mode does.

use astrochat_core::types::{DislikeReason, FeedbackType, Position};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{AppState, Mode};
use crate::ui::reaction_palette::PER_ROW;

/// Control-flow signal returned from the dispatchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Dispatches a key event to the handler for whatever currently owns input.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    state.clear_notice();

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    if state.chat().show_rating_modal {
        return handle_rating(key, state);
    }
    if state.chat().is_reacting() {
        return handle_palette(key, state);
    }
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Normal => handle_normal(key, state),
        Mode::Insert => handle_insert(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_navigation_key(key, state) {
        return action;
    }

    match key.code {
        // Reply ("swipe") and react ("long press")
        KeyCode::Char('r') => state.reply_to_selected(),
        KeyCode::Char('e') => {
            let anchor = selected_anchor(state);
            state.open_reactions(anchor);
        }

        // Feedback on AI replies
        KeyCode::Char('+') => state.toggle_feedback(FeedbackType::Liked),
        KeyCode::Char('-') => state.toggle_feedback(FeedbackType::Disliked),
        KeyCode::Char(c @ '1'..='3') => {
            let reason = DislikeReason::ALL[(c as u8 - b'1') as usize];
            state.select_reason(reason);
        }
        KeyCode::Char('o') => state.store.toggle_feedback_options(),

        // Compose
        KeyCode::Char('i') | KeyCode::Enter => state.mode = Mode::Insert,
        KeyCode::Esc => state.cancel_reply(),

        KeyCode::Char('R') => state.open_rating(),
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
        }
        KeyCode::Char('q') => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::Continue
}

/// Selection movement. Returns `None` when the key is not a navigation key.
fn handle_navigation_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.select_next(1),
        KeyCode::Char('k') | KeyCode::Up => state.select_prev(1),
        KeyCode::Char('g') | KeyCode::Home => state.select_first(),
        KeyCode::Char('G') | KeyCode::End => state.select_last(),
        KeyCode::Char('d') if ctrl => state.half_page_down(),
        KeyCode::Char('u') if ctrl => state.half_page_up(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

/// Top-left corner of the selected bubble, if it is on screen.
fn selected_anchor(state: &AppState) -> Option<Position> {
    let selected = state.list_state.selected()?;
    state
        .bubble_rects
        .iter()
        .find(|(index, _)| *index == selected)
        .map(|(_, rect)| Position { x: rect.x + 2, y: rect.y })
}

// ---------------------------------------------------------------------------
// Insert mode
// ---------------------------------------------------------------------------

fn handle_insert(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => state.mode = Mode::Normal,
        KeyCode::Char('x') if ctrl => state.cancel_reply(),
        KeyCode::Enter => {
            state.submit_input();
        }
        KeyCode::Backspace => {
            state.input.pop();
        }
        KeyCode::Char(c) if !ctrl => state.input.push(c),
        _ => {}
    }
    KeyAction::Continue
}

/// Appends pasted text to the compose line, flattening newlines.
pub fn handle_paste(text: &str, state: &mut AppState) {
    if state.mode != Mode::Insert {
        return;
    }
    state
        .input
        .extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn handle_palette(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => state.move_palette(-1),
        KeyCode::Char('l') | KeyCode::Right => state.move_palette(1),
        KeyCode::Char('k') | KeyCode::Up => state.move_palette(-(PER_ROW as isize)),
        KeyCode::Char('j') | KeyCode::Down => state.move_palette(PER_ROW as isize),
        KeyCode::Enter | KeyCode::Char(' ') => state.choose_reaction(),
        KeyCode::Esc | KeyCode::Char('q') => state.close_reactions(),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_rating(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char(c @ '1'..='5') => state.set_rating_draft(c as u8 - b'0'),
        KeyCode::Char('h') | KeyCode::Left => state.nudge_rating_draft(-1),
        KeyCode::Char('l') | KeyCode::Right => state.nudge_rating_draft(1),
        KeyCode::Enter => state.submit_rating(),
        KeyCode::Esc | KeyCode::Char('q') => state.dismiss_rating(),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Left click selects a bubble, right click opens its reaction palette at the
/// pointer, and the wheel moves the selection (or scrolls help).
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    if state.chat().show_rating_modal {
        return KeyAction::Continue;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if state.chat().is_reacting() {
                state.close_reactions();
            } else if let Some(index) = state.bubble_at(mouse.column, mouse.row) {
                state.select_index(index);
            }
        }
        MouseEventKind::Down(MouseButton::Right) => {
            if let Some(index) = state.bubble_at(mouse.column, mouse.row) {
                state.select_index(index);
                state.open_reactions(Some(Position { x: mouse.column, y: mouse.row }));
            }
        }
        MouseEventKind::ScrollUp if state.mode == Mode::HelpOverlay => {
            state.help_scroll = state.help_scroll.saturating_sub(3);
        }
        MouseEventKind::ScrollDown if state.mode == Mode::HelpOverlay => {
            state.help_scroll = state.help_scroll.saturating_add(3);
        }
        MouseEventKind::ScrollUp if !state.chat().is_reacting() => state.select_prev(1),
        MouseEventKind::ScrollDown if !state.chat().is_reacting() => state.select_next(1),
        _ => {}
    }
    KeyAction::Continue
}
