use serde::{Deserialize, Serialize};

/// Who authored a message. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    AiAstrologer,
    HumanAstrologer,
    System,
}

impl Sender {
    /// Name shown above a bubble.
    pub fn display_name(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::System => "System",
            Sender::HumanAstrologer => "Astrologer Vikram",
            Sender::AiAstrologer => "AI Astrologer",
        }
    }

    pub fn is_user(self) -> bool {
        self == Sender::User
    }
}

/// Rendering category of a message. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Text,
    Ai,
    Human,
    Event,
}

/// Like/dislike judgment on a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    Liked,
    Disliked,
}

/// Why a message was disliked. Only meaningful alongside [`FeedbackType::Disliked`].
///
/// The camelCase spellings are accepted on input because the legacy single-slot
/// feedback pointer used them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DislikeReason {
    Inaccurate,
    #[serde(alias = "tooVague")]
    TooVague,
    #[serde(alias = "tooLong")]
    TooLong,
}

impl DislikeReason {
    /// All reasons in chip order.
    pub const ALL: [DislikeReason; 3] = [
        DislikeReason::Inaccurate,
        DislikeReason::TooVague,
        DislikeReason::TooLong,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DislikeReason::Inaccurate => "Inaccurate",
            DislikeReason::TooVague => "Too vague",
            DislikeReason::TooLong => "Too long",
        }
    }
}

/// A single chat message.
///
/// Messages are replaced rather than mutated in place by consumers; the reducer
/// is the only code that rewrites `feedback_type`, `dislike_reason` and
/// `reactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    /// Creation time in Unix epoch milliseconds.
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_type: Option<FeedbackType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dislike_reason: Option<DislikeReason>,
    /// Id of the message this one answers. Not validated to exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Emoji in the order they were added; duplicates count as multiplicity.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<String>,
}

impl Message {
    /// Creates a message with no feedback, reply link, or reactions.
    pub fn new(
        id: impl Into<String>,
        sender: Sender,
        kind: MessageKind,
        text: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            sender,
            text: text.into(),
            timestamp,
            kind,
            feedback_type: None,
            dislike_reason: None,
            reply_to: None,
            reactions: Vec::new(),
        }
    }

    pub fn with_reply_to(mut self, id: impl Into<String>) -> Self {
        self.reply_to = Some(id.into());
        self
    }

    pub fn with_feedback(mut self, feedback: FeedbackType) -> Self {
        self.feedback_type = Some(feedback);
        self
    }

    /// Groups reactions into `(emoji, count)` pairs in first-seen order.
    pub fn reaction_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for emoji in &self.reactions {
            match counts.iter_mut().find(|(e, _)| *e == emoji.as_str()) {
                Some((_, n)) => *n += 1,
                None => counts.push((emoji.as_str(), 1)),
            }
        }
        counts
    }
}

/// Screen anchor for the reaction palette, in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

/// Which message has its reaction palette open. An empty `message_id` means none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactingToMessage {
    #[serde(default)]
    pub message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl ReactingToMessage {
    pub fn open(message_id: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            message_id: message_id.into(),
            position,
        }
    }

    /// The "no palette open" value.
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        !self.message_id.is_empty()
    }
}

/// Legacy single-slot feedback pointer, kept alongside per-message feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSlot {
    pub message_id: Option<String>,
    #[serde(rename = "type")]
    pub reason: Option<DislikeReason>,
}

/// Highest value a session rating can hold.
pub const MAX_RATING: u8 = 5;

/// The whole session: message log plus transient UI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    pub messages: Vec<Message>,
    /// Message staged as the target of the next send.
    pub reply_to: Option<Message>,
    pub selected_message_id: Option<String>,
    pub show_feedback_options: bool,
    pub show_rating_modal: bool,
    /// Star rating, `0..=MAX_RATING`.
    pub rating: u8,
    pub feedback: FeedbackSlot,
    pub reacting_to_message: ReactingToMessage,
}

impl ChatState {
    /// Fresh state holding `messages` and default flags.
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Resolves `message.reply_to` against the log. Dangling ids yield `None`.
    pub fn replied_message(&self, message: &Message) -> Option<&Message> {
        message.reply_to.as_deref().and_then(|id| self.message(id))
    }

    pub fn is_reacting(&self) -> bool {
        self.reacting_to_message.is_open()
    }
}
