//! The action vocabulary accepted by the reducer.
//!
//! Replay scripts (see [`crate::script`]) spell actions as
//! `{ type = "ADD_REACTION", payload = { ... } }`. A `type` the vocabulary does not
//! know deserializes to [`Action::Unknown`], which the reducer ignores; such
//! entries must not carry a `payload`. Actions are input only and are never
//! written back out.

use serde::{Deserialize, Deserializer};

use crate::types::{DislikeReason, FeedbackType, Message, ReactingToMessage};

/// A named state-transition request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Append a message and clear the staged reply target.
    SendMessage(Message),
    SetReply(Option<Message>),
    SetSelectedMessage(Option<String>),
    ToggleFeedbackOptions,
    /// Legacy single-slot feedback; also cross-writes the message's `feedback_type`.
    #[serde(rename_all = "camelCase")]
    SetFeedback {
        message_id: Option<String>,
        #[serde(rename = "type")]
        reason: Option<DislikeReason>,
    },
    /// Per-message feedback.
    ///
    /// `dislike_reason` is tri-state: `None` leaves the reason to the default rule,
    /// `Some(None)` clears it explicitly and `Some(Some(r))` sets it.
    #[serde(rename_all = "camelCase")]
    UpdateMessageFeedback {
        message_id: String,
        #[serde(default)]
        feedback_type: Option<FeedbackType>,
        #[serde(default, deserialize_with = "explicit_option")]
        dislike_reason: Option<Option<DislikeReason>>,
    },
    ToggleRatingModal,
    SetReactingToMessage(ReactingToMessage),
    SetRating(u8),
    #[serde(rename_all = "camelCase")]
    AddReaction { message_id: String, emoji: String },
    /// Any action type this build does not recognise.
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Stable name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SendMessage(_) => "SEND_MESSAGE",
            Action::SetReply(_) => "SET_REPLY",
            Action::SetSelectedMessage(_) => "SET_SELECTED_MESSAGE",
            Action::ToggleFeedbackOptions => "TOGGLE_FEEDBACK_OPTIONS",
            Action::SetFeedback { .. } => "SET_FEEDBACK",
            Action::UpdateMessageFeedback { .. } => "UPDATE_MESSAGE_FEEDBACK",
            Action::ToggleRatingModal => "TOGGLE_RATING_MODAL",
            Action::SetReactingToMessage(_) => "SET_REACTING_TO_MESSAGE",
            Action::SetRating(_) => "SET_RATING",
            Action::AddReaction { .. } => "ADD_REACTION",
            Action::Unknown => "UNKNOWN",
        }
    }
}

/// Distinguishes "field present" from "field absent" for an optional value.
///
/// Combined with `#[serde(default)]`: an absent field stays `None`, a present one
/// becomes `Some(..)` even when its value is null.
fn explicit_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
