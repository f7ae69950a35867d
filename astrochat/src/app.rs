//! Central application state for astrochat.
//!
//! `AppState` wraps the session's [`ChatStore`] together with the purely visual
//! state the terminal needs: input mode, the compose buffer, list selection,
//! the reaction-palette cursor, and the rating draft. Chat data and the
//! reply/reaction/rating flags live only in the store; everything here either
//! reads them or calls a store dispatcher. No ratatui rendering happens in this
//! module.

use std::sync::Arc;
use std::time::{Duration, Instant};

use astrochat_core::types::{
    ChatState, DislikeReason, FeedbackType, Message, Position, Sender, MAX_RATING,
};
use astrochat_core::ChatStore;
use crossbeam_channel::Receiver;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;

/// Emoji offered by the reaction palette, in display order.
pub const REACTIONS: [&str; 24] = [
    "👍", "❤️", "😂", "😮", "😢", "🙏", "🔥", "🎉", "😎", "💯", "👏", "🤝", "😡", "🤔", "😍",
    "🥳", "🤯", "😭", "💔", "🚀", "🙌", "👀", "😴", "🤗",
];

/// How long a status-bar notice stays up without a keypress.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Input mode controlling which keybinding set is active.
///
/// The reaction palette and the rating modal are not modes: they are open
/// whenever the store says so, and take precedence over the mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigate and act on messages (default).
    #[default]
    Normal,
    /// Typing into the compose line.
    Insert,
    /// Full-screen help overlay.
    HelpOverlay,
}

/// All state passed through every render cycle.
pub struct AppState {
    /// The session store. Sole owner of chat data.
    pub store: ChatStore,
    updates: Receiver<Arc<ChatState>>,
    last_seen_len: usize,

    pub mode: Mode,
    /// Compose buffer for Insert mode.
    pub input: String,
    /// Selection in the message list; mirrors `selected_message_id` in the store.
    pub list_state: ListState,
    /// Highlighted entry in [`REACTIONS`] while the palette is open.
    pub palette_cursor: usize,
    /// Stars chosen in the open rating modal, not yet submitted.
    pub rating_draft: u8,
    pub help_scroll: u16,
    /// One-line notice shown in the status bar until the next keypress or
    /// until [`NOTICE_TTL`] passes.
    pub notice: Option<String>,
    notice_shown_at: Option<Instant>,

    /// Screen rect of each visible bubble, cached after each render for mouse hits.
    pub bubble_rects: Vec<(usize, Rect)>,
    /// Inner height of the message list, cached after each render.
    pub list_viewport_height: u16,
}

impl AppState {
    /// Builds the UI state around `store` and selects the newest message.
    pub fn new(mut store: ChatStore) -> Self {
        let updates = store.subscribe();
        let last_seen_len = store.state().messages.len();
        let mut app = Self {
            store,
            updates,
            last_seen_len,
            mode: Mode::default(),
            input: String::new(),
            list_state: ListState::default(),
            palette_cursor: 0,
            rating_draft: 0,
            help_scroll: 0,
            notice: None,
            notice_shown_at: None,
            bubble_rects: Vec::new(),
            list_viewport_height: 0,
        };
        app.select_last();
        app
    }

    pub fn chat(&self) -> &ChatState {
        self.store.state()
    }

    /// Drains store snapshots and follows the tail when new messages arrive.
    ///
    /// Called once per event-loop iteration; replaces the scroll-to-end that a
    /// send would otherwise need.
    pub fn sync_with_store(&mut self) {
        let mut newest = None;
        for snapshot in self.updates.try_iter() {
            newest = Some(snapshot.messages.len());
        }
        if let Some(len) = newest {
            if len > self.last_seen_len {
                tracing::debug!(from = self.last_seen_len, to = len, "following new messages");
                self.select_last();
            }
            self.last_seen_len = len;
        }
    }

    pub fn set_notice(&mut self, text: String) {
        self.notice = Some(text);
        self.notice_shown_at = Some(Instant::now());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
        self.notice_shown_at = None;
    }

    /// Clears the notice once it has been up for [`NOTICE_TTL`]. Driven by `Tick`.
    pub fn expire_notice(&mut self, now: Instant) {
        let Some(shown) = self.notice_shown_at else {
            return;
        };
        if now.saturating_duration_since(shown) >= NOTICE_TTL {
            self.clear_notice();
        }
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn selected_message(&self) -> Option<&Message> {
        self.list_state
            .selected()
            .and_then(|i| self.chat().messages.get(i))
    }

    /// Selects the message at `index` (clamped) and records it in the store.
    pub fn select_index(&mut self, index: usize) {
        let len = self.chat().messages.len();
        if len == 0 {
            self.list_state.select(None);
            self.store.set_selected_message(None);
            return;
        }
        let index = index.min(len - 1);
        self.list_state.select(Some(index));
        let id = self.chat().messages[index].id.clone();
        if self.chat().selected_message_id.as_deref() != Some(id.as_str()) {
            self.store.set_selected_message(Some(id));
        }
    }

    pub fn select_next(&mut self, by: usize) {
        let current = self.list_state.selected().unwrap_or(0);
        self.select_index(current.saturating_add(by));
    }

    pub fn select_prev(&mut self, by: usize) {
        let current = self.list_state.selected().unwrap_or(0);
        self.select_index(current.saturating_sub(by));
    }

    pub fn select_first(&mut self) {
        self.select_index(0);
    }

    pub fn select_last(&mut self) {
        let len = self.chat().messages.len();
        self.select_index(len.saturating_sub(1));
    }

    /// Moves the selection by roughly half a screen of bubbles.
    pub fn half_page_down(&mut self) {
        let step = (self.list_viewport_height / 8).max(1);
        self.select_next(step as usize);
    }

    pub fn half_page_up(&mut self) {
        let step = (self.list_viewport_height / 8).max(1);
        self.select_prev(step as usize);
    }

    /// Returns the message index whose cached bubble contains `(col, row)`.
    pub fn bubble_at(&self, col: u16, row: u16) -> Option<usize> {
        let pos = ratatui::layout::Position { x: col, y: row };
        self.bubble_rects
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(index, _)| *index)
    }

    // -----------------------------------------------------------------------
    // Reply and compose
    // -----------------------------------------------------------------------

    /// Stages the selected message as the reply target and starts composing.
    ///
    /// Only astrologer messages can be replied to; the user's own bubbles and
    /// session events cannot.
    pub fn reply_to_selected(&mut self) {
        let Some(target) = self.selected_message().cloned() else {
            return;
        };
        if matches!(target.sender, Sender::System | Sender::User) {
            return;
        }
        self.store.set_reply(Some(target));
        self.mode = Mode::Insert;
    }

    pub fn cancel_reply(&mut self) {
        if self.chat().reply_to.is_some() {
            self.store.set_reply(None);
        }
    }

    /// Sends the compose buffer. Whitespace-only input is ignored.
    ///
    /// Returns `true` when a message was sent.
    pub fn submit_input(&mut self) -> bool {
        let text = self.input.trim();
        if text.is_empty() {
            return false;
        }
        let id = self.store.send_message(text);
        tracing::info!(%id, "message sent");
        self.input.clear();
        true
    }

    // -----------------------------------------------------------------------
    // Reactions
    // -----------------------------------------------------------------------

    /// Opens the reaction palette for the selected message, anchored at `anchor`.
    pub fn open_reactions(&mut self, anchor: Option<Position>) {
        let Some(id) = self.selected_message().map(|m| m.id.clone()) else {
            return;
        };
        self.palette_cursor = 0;
        self.store.set_reacting_to_message(id, anchor);
    }

    pub fn move_palette(&mut self, delta: isize) {
        let len = REACTIONS.len() as isize;
        let next = (self.palette_cursor as isize + delta).rem_euclid(len);
        self.palette_cursor = next as usize;
    }

    /// Adds the highlighted emoji to the reacting-to message and closes the palette.
    pub fn choose_reaction(&mut self) {
        let target = self.chat().reacting_to_message.message_id.clone();
        if target.is_empty() {
            return;
        }
        let emoji = REACTIONS[self.palette_cursor % REACTIONS.len()];
        self.store.add_reaction(target, emoji);
        self.close_reactions();
    }

    pub fn close_reactions(&mut self) {
        self.store.set_reacting_to_message("", None);
    }

    // -----------------------------------------------------------------------
    // Feedback
    // -----------------------------------------------------------------------

    /// Like/dislike toggle on the selected AI message.
    ///
    /// Pressing the active choice again clears feedback; switching choice resets the
    /// reason. Non-AI messages are ignored.
    pub fn toggle_feedback(&mut self, kind: FeedbackType) {
        let Some(msg) = self.selected_message() else {
            return;
        };
        if msg.sender != Sender::AiAstrologer {
            return;
        }
        let id = msg.id.clone();
        let next = if msg.feedback_type == Some(kind) {
            None
        } else {
            Some(kind)
        };
        self.store.update_message_feedback(id, next, Some(None));
    }

    /// Picks a reason chip on the selected message. Chips only exist once disliked.
    pub fn select_reason(&mut self, reason: DislikeReason) {
        let Some(msg) = self.selected_message() else {
            return;
        };
        if msg.sender != Sender::AiAstrologer || msg.feedback_type != Some(FeedbackType::Disliked) {
            return;
        }
        let id = msg.id.clone();
        self.store
            .update_message_feedback(id, Some(FeedbackType::Disliked), Some(Some(reason)));
    }

    // -----------------------------------------------------------------------
    // Rating modal
    // -----------------------------------------------------------------------

    /// "End chat": opens the rating modal with an empty draft.
    pub fn open_rating(&mut self) {
        if !self.chat().show_rating_modal {
            self.rating_draft = 0;
            self.store.toggle_rating_modal();
        }
    }

    pub fn set_rating_draft(&mut self, stars: u8) {
        self.rating_draft = stars.clamp(1, MAX_RATING);
    }

    pub fn nudge_rating_draft(&mut self, delta: i8) {
        let next = (self.rating_draft as i8 + delta).clamp(1, MAX_RATING as i8);
        self.rating_draft = next as u8;
    }

    /// Stores the drafted rating and closes the modal. No-op until a star is picked.
    pub fn submit_rating(&mut self) {
        if self.rating_draft == 0 || !self.chat().show_rating_modal {
            return;
        }
        let stars = self.rating_draft;
        self.store.set_rating(stars);
        self.store.toggle_rating_modal();
        self.rating_draft = 0;
        tracing::info!(stars, "session rated");
        self.set_notice(format!(
            "Thank you! You rated us {} star{}. Your feedback is valuable to us!",
            stars,
            if stars == 1 { "" } else { "s" }
        ));
    }

    /// "Not now": closes the modal without storing the draft.
    pub fn dismiss_rating(&mut self) {
        if self.chat().show_rating_modal {
            self.store.toggle_rating_modal();
        }
        self.rating_draft = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> AppState {
        AppState::new(ChatStore::default())
    }

    #[test]
    fn starts_on_newest_message() {
        let app = app();
        assert_eq!(app.list_state.selected(), Some(5));
        assert_eq!(app.chat().selected_message_id.as_deref(), Some("6"));
    }

    #[test]
    fn reply_then_send_links_and_follows_tail() {
        let mut app = app();
        app.select_index(3);
        app.reply_to_selected();
        assert_eq!(app.mode, Mode::Insert);
        assert_eq!(app.chat().reply_to.as_ref().map(|m| m.id.as_str()), Some("4"));

        app.input = "  what about Rahu?  ".into();
        assert!(app.submit_input());
        app.sync_with_store();

        let last = app.chat().messages.last().unwrap();
        assert_eq!(last.text, "what about Rahu?");
        assert_eq!(last.reply_to.as_deref(), Some("4"));
        assert!(app.chat().reply_to.is_none());
        assert!(app.input.is_empty());
        assert_eq!(app.list_state.selected(), Some(6));
    }

    #[test]
    fn blank_input_is_not_sent() {
        let mut app = app();
        app.input = "   ".into();
        assert!(!app.submit_input());
        assert_eq!(app.chat().messages.len(), 6);
    }

    #[test]
    fn only_astrologer_messages_can_be_replied_to() {
        let mut app = app();
        // 1 is the system greeting, 2 and 5 are the user's own messages.
        for index in [0, 1, 4] {
            app.select_index(index);
            app.reply_to_selected();
            assert!(app.chat().reply_to.is_none(), "message {} took a reply", index + 1);
            assert_eq!(app.mode, Mode::Normal);
        }

        app.select_index(2);
        app.reply_to_selected();
        assert_eq!(app.chat().reply_to.as_ref().map(|m| m.id.as_str()), Some("3"));
    }

    #[test]
    fn feedback_toggle_matches_bubble_behaviour() {
        let mut app = app();
        app.select_index(2);

        // Message 3 starts liked; pressing like again clears it.
        app.toggle_feedback(FeedbackType::Liked);
        assert_eq!(app.selected_message().unwrap().feedback_type, None);

        app.toggle_feedback(FeedbackType::Disliked);
        app.select_reason(DislikeReason::Inaccurate);
        let msg = app.selected_message().unwrap();
        assert_eq!(msg.feedback_type, Some(FeedbackType::Disliked));
        assert_eq!(msg.dislike_reason, Some(DislikeReason::Inaccurate));

        app.toggle_feedback(FeedbackType::Liked);
        let msg = app.selected_message().unwrap();
        assert_eq!(msg.feedback_type, Some(FeedbackType::Liked));
        assert_eq!(msg.dislike_reason, None);
    }

    #[test]
    fn feedback_ignores_non_ai_messages() {
        let mut app = app();
        app.select_index(3);
        app.toggle_feedback(FeedbackType::Liked);
        app.select_reason(DislikeReason::TooLong);
        assert_eq!(app.selected_message().unwrap().feedback_type, None);
    }

    #[test]
    fn reason_chips_need_a_dislike_first() {
        let mut app = app();
        app.select_index(5);
        app.select_reason(DislikeReason::TooVague);
        assert_eq!(app.selected_message().unwrap().dislike_reason, None);
    }

    #[test]
    fn reaction_palette_adds_and_closes() {
        let mut app = app();
        app.select_index(1);
        app.open_reactions(Some(Position { x: 4, y: 6 }));
        assert!(app.chat().is_reacting());

        app.move_palette(1);
        app.choose_reaction();
        assert!(!app.chat().is_reacting());
        assert_eq!(app.chat().message("2").unwrap().reactions, ["❤️"]);

        app.open_reactions(None);
        app.move_palette(-1);
        app.choose_reaction();
        assert_eq!(app.chat().message("2").unwrap().reactions, ["❤️", "🤗"]);
    }

    #[test]
    fn rating_submit_requires_a_star() {
        let mut app = app();
        app.open_rating();
        assert!(app.chat().show_rating_modal);

        app.submit_rating();
        assert!(app.chat().show_rating_modal, "nothing to submit yet");

        app.set_rating_draft(4);
        app.nudge_rating_draft(3);
        assert_eq!(app.rating_draft, 5);
        app.submit_rating();
        assert!(!app.chat().show_rating_modal);
        assert_eq!(app.chat().rating, 5);
        assert!(app.notice.as_deref().unwrap().contains("5 stars"));
        let shown = app.notice_shown_at.unwrap();
        app.expire_notice(shown + Duration::from_secs(1));
        assert!(app.notice.is_some(), "still fresh");
        app.expire_notice(shown + NOTICE_TTL);
        assert!(app.notice.is_none());

        app.open_rating();
        assert_eq!(app.chat().rating, 0);
        app.dismiss_rating();
        assert!(!app.chat().show_rating_modal);
        assert_eq!(app.chat().rating, 0);
    }
}
