//! The session store and its dispatch facade.
//!
//! `ChatStore` owns the one [`ChatState`] of a session. Consumers read it through
//! [`ChatStore::state`] or a subscription and change it only through the dispatch
//! methods, each of which builds a single [`Action`] and runs it through
//! [`reduce`]. `dispatch` takes `&mut self`, so actions always apply one at a time
//! in call order.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crossbeam_channel::{Receiver, Sender};

use crate::action::Action;
use crate::error::LoadError;
use crate::reducer::reduce;
use crate::seed::default_seed;
use crate::types::{
    ChatState, DislikeReason, FeedbackType, Message, MessageKind, Position, ReactingToMessage,
    Sender as MessageSender,
};

/// Owner of the session state.
pub struct ChatStore {
    state: ChatState,
    subscribers: Vec<Sender<Arc<ChatState>>>,
}

impl Default for ChatStore {
    /// A store seeded with [`default_seed`].
    fn default() -> Self {
        Self::new(default_seed())
    }
}

/// Returns the current Unix timestamp in milliseconds.
fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

impl ChatStore {
    /// Creates a store whose log starts with `seed`.
    pub fn new(seed: Vec<Message>) -> Self {
        Self {
            state: ChatState::with_messages(seed),
            subscribers: Vec::new(),
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &ChatState {
        &self.state
    }

    /// Registers a subscriber that receives a snapshot after every dispatch.
    ///
    /// Dropping the receiver unsubscribes; the sender is pruned on the next dispatch.
    pub fn subscribe(&mut self) -> Receiver<Arc<ChatState>> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Applies `action` and notifies subscribers.
    pub fn dispatch(&mut self, action: Action) {
        let kind = action.kind();
        self.state = reduce(std::mem::take(&mut self.state), action);
        tracing::debug!(action = kind, messages = self.state.messages.len(), "dispatched");

        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = Arc::new(self.state.clone());
        self.subscribers
            .retain(|tx| tx.send(Arc::clone(&snapshot)).is_ok());
    }

    /// Dispatches every action in order.
    ///
    /// The script is checked before anything is applied: a `SendMessage` whose id
    /// is already in the log, or was sent earlier in the same script, rejects the
    /// whole script and leaves the state untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::DuplicateId`] naming the first reused id.
    pub fn replay(&mut self, actions: impl IntoIterator<Item = Action>) -> Result<(), LoadError> {
        let actions: Vec<Action> = actions.into_iter().collect();

        let mut ids: HashSet<&str> = self.state.messages.iter().map(|m| m.id.as_str()).collect();
        for action in &actions {
            if let Action::SendMessage(message) = action {
                if !ids.insert(message.id.as_str()) {
                    return Err(LoadError::DuplicateId {
                        id: message.id.clone(),
                    });
                }
            }
        }

        for action in actions {
            self.dispatch(action);
        }
        Ok(())
    }

    /// Sends a user text message, anchored to the staged reply target if any.
    ///
    /// The new message gets a fresh UUID v4 id and the current time. Returns the id.
    pub fn send_message(&mut self, text: impl Into<String>) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let mut message = Message::new(
            id.clone(),
            MessageSender::User,
            MessageKind::Text,
            text,
            now_millis(),
        );
        message.reply_to = self.state.reply_to.as_ref().map(|m| m.id.clone());
        self.dispatch(Action::SendMessage(message));
        id
    }

    pub fn set_reply(&mut self, message: Option<Message>) {
        self.dispatch(Action::SetReply(message));
    }

    pub fn set_selected_message(&mut self, id: Option<String>) {
        self.dispatch(Action::SetSelectedMessage(id));
    }

    pub fn toggle_feedback_options(&mut self) {
        self.dispatch(Action::ToggleFeedbackOptions);
    }

    /// Legacy single-slot feedback. Prefer [`ChatStore::update_message_feedback`].
    pub fn set_feedback(&mut self, message_id: Option<String>, reason: Option<DislikeReason>) {
        self.dispatch(Action::SetFeedback { message_id, reason });
    }

    /// Sets a message's feedback. See [`Action::UpdateMessageFeedback`] for the
    /// meaning of the tri-state `dislike_reason`.
    pub fn update_message_feedback(
        &mut self,
        message_id: impl Into<String>,
        feedback_type: Option<FeedbackType>,
        dislike_reason: Option<Option<DislikeReason>>,
    ) {
        self.dispatch(Action::UpdateMessageFeedback {
            message_id: message_id.into(),
            feedback_type,
            dislike_reason,
        });
    }

    pub fn toggle_rating_modal(&mut self) {
        self.dispatch(Action::ToggleRatingModal);
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.dispatch(Action::SetRating(rating));
    }

    pub fn add_reaction(&mut self, message_id: impl Into<String>, emoji: impl Into<String>) {
        self.dispatch(Action::AddReaction {
            message_id: message_id.into(),
            emoji: emoji.into(),
        });
    }

    /// Opens the reaction palette for `message_id`; an empty id closes it.
    pub fn set_reacting_to_message(
        &mut self,
        message_id: impl Into<String>,
        position: Option<Position>,
    ) {
        self.dispatch(Action::SetReactingToMessage(ReactingToMessage::open(
            message_id, position,
        )));
    }
}
