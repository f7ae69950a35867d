//! astrochat-core: the state model behind the astrochat consultation client.
//!
//! The crate is UI-agnostic. It holds the message/session data model
//! ([`types`]), the action vocabulary ([`action`]), the pure state machine
//! ([`reducer`]), and the [`store::ChatStore`] that owns the session state and
//! exposes one dispatch method per action. [`seed`] and [`script`] load fixture
//! conversations and replayable action lists from TOML.

pub mod action;
pub mod error;
pub mod reducer;
pub mod script;
pub mod seed;
pub mod store;
pub mod types;

pub use action::Action;
pub use error::LoadError;
pub use reducer::reduce;
pub use store::ChatStore;
pub use types::{
    ChatState, DislikeReason, FeedbackType, Message, MessageKind, Position, ReactingToMessage,
    Sender,
};
