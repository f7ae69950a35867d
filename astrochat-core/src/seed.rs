//! Fixture conversations loaded into a new store.
//!
//! [`default_seed`] is the built-in six-message demo session. [`load_seed`] reads
//! the same shape from a TOML file of `[[messages]]` tables so a demo can be
//! swapped without recompiling.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;
use crate::types::{FeedbackType, Message, MessageKind, Sender};

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    messages: Vec<Message>,
}

/// The built-in demo conversation.
///
/// System greeting, a user question, an AI reply pre-marked as liked, a human
/// astrologer reply, a user follow-up replying to message `4`, and a final AI reply.
pub fn default_seed() -> Vec<Message> {
    vec![
        Message::new(
            "1",
            Sender::System,
            MessageKind::Event,
            "Your session with Astrologer Vikram has started.",
            1_734_681_480_000,
        ),
        Message::new(
            "2",
            Sender::User,
            MessageKind::Text,
            "Namaste. I am feeling very anxious about my current job. Can you look at my chart?",
            1_734_681_600_000,
        ),
        Message::new(
            "3",
            Sender::AiAstrologer,
            MessageKind::Ai,
            "Namaste! I am analyzing your birth details. Currently, you are running through \
             Shani Mahadasha. This often brings pressure but builds resilience.",
            1_734_681_660_000,
        )
        .with_feedback(FeedbackType::Liked),
        Message::new(
            "4",
            Sender::HumanAstrologer,
            MessageKind::Human,
            "I see the same. Look at your 6th house; Saturn is transiting there. This is why \
             you feel the workload is heavy.",
            1_734_681_720_000,
        ),
        Message::new(
            "5",
            Sender::User,
            MessageKind::Text,
            "Is there any remedy for this? I find it hard to focus.",
            1_734_681_780_000,
        )
        .with_reply_to("4"),
        Message::new(
            "6",
            Sender::AiAstrologer,
            MessageKind::Ai,
            "I suggest chanting the Shani Mantra 108 times on Saturdays. Would you like the \
             specific mantra text?",
            1_734_681_840_000,
        ),
    ]
}

/// Parses a seed conversation from TOML text.
///
/// `path` is only used to label errors.
pub fn parse_seed(raw: &str, path: &Path) -> Result<Vec<Message>, LoadError> {
    let file: SeedFile = toml::from_str(raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut seen = HashSet::new();
    for msg in &file.messages {
        if !seen.insert(msg.id.as_str()) {
            return Err(LoadError::DuplicateId { id: msg.id.clone() });
        }
        if msg.dislike_reason.is_some() && msg.feedback_type != Some(FeedbackType::Disliked) {
            return Err(LoadError::StrayDislikeReason { id: msg.id.clone() });
        }
    }
    Ok(file.messages)
}

/// Reads and parses a seed conversation from a TOML file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, [`LoadError::Parse`] if it
/// is not a valid seed, [`LoadError::DuplicateId`] if two messages share an id, and
/// [`LoadError::StrayDislikeReason`] if a reason sits on a message that is not
/// disliked.
pub fn load_seed(path: impl AsRef<Path>) -> Result<Vec<Message>, LoadError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let messages = parse_seed(&raw, path)?;
    tracing::info!(path = %path.display(), count = messages.len(), "loaded seed conversation");
    Ok(messages)
}
