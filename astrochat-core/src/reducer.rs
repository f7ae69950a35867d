//! The chat state machine.
//!
//! [`reduce`] is the only code path that changes a [`ChatState`]. It is a pure
//! function: it takes the current state by value, applies one [`Action`], and
//! returns the next state. Actions that reference a message id not present in the
//! log leave the log untouched instead of failing.

use crate::action::Action;
use crate::types::{ChatState, DislikeReason, FeedbackSlot, FeedbackType, MAX_RATING};

/// Computes the state that follows `state` once `action` is applied.
pub fn reduce(mut state: ChatState, action: Action) -> ChatState {
    match action {
        Action::SendMessage(message) => {
            state.messages.push(message);
            state.reply_to = None;
        }
        Action::SetReply(message) => {
            state.reply_to = message;
        }
        Action::SetSelectedMessage(id) => {
            state.selected_message_id = id;
        }
        Action::ToggleFeedbackOptions => {
            state.show_feedback_options = !state.show_feedback_options;
        }
        Action::SetFeedback { message_id, reason } => {
            if let Some(id) = message_id.as_deref() {
                if let Some(msg) = state.messages.iter_mut().find(|m| m.id == id) {
                    if reason.is_some() {
                        msg.feedback_type = Some(FeedbackType::Disliked);
                    } else {
                        msg.feedback_type = None;
                        msg.dislike_reason = None;
                    }
                }
            }
            state.feedback = FeedbackSlot { message_id, reason };
        }
        Action::UpdateMessageFeedback {
            message_id,
            feedback_type,
            dislike_reason,
        } => {
            if message_id.is_empty() {
                return state;
            }
            if let Some(msg) = state.messages.iter_mut().find(|m| m.id == message_id) {
                msg.feedback_type = feedback_type;
                msg.dislike_reason = next_dislike_reason(
                    feedback_type,
                    dislike_reason,
                    msg.dislike_reason,
                );
            }
        }
        Action::ToggleRatingModal => {
            let opening = !state.show_rating_modal;
            state.show_rating_modal = opening;
            if opening {
                state.rating = 0;
            }
        }
        Action::SetReactingToMessage(target) => {
            state.reacting_to_message = target;
        }
        Action::SetRating(value) => {
            state.rating = value.min(MAX_RATING);
        }
        Action::AddReaction { message_id, emoji } => {
            if let Some(msg) = state.messages.iter_mut().find(|m| m.id == message_id) {
                msg.reactions.push(emoji);
            }
        }
        Action::Unknown => {}
    }
    state
}

/// Decides a message's dislike reason after its feedback type changes.
///
/// An explicit reason wins, a non-dislike always scrubs the reason, and a bare
/// dislike keeps whatever reason was chosen before.
fn next_dislike_reason(
    feedback_type: Option<FeedbackType>,
    explicit: Option<Option<DislikeReason>>,
    current: Option<DislikeReason>,
) -> Option<DislikeReason> {
    if feedback_type != Some(FeedbackType::Disliked) {
        return None;
    }
    match explicit {
        Some(reason) => reason,
        None => current,
    }
}
