//! Integration tests for `ChatStore` and the TOML loaders.
//!
//! Covers the built-in seed, the dispatch facade (including how `send_message`
//! stamps ids and reply links), subscriber snapshots and pruning, seed files, and
//! action-script replay.

use std::path::Path;

use astrochat_core::script::{load_actions, parse_actions};
use astrochat_core::seed::{default_seed, load_seed, parse_seed};
use astrochat_core::types::{DislikeReason, FeedbackType, Sender};
use astrochat_core::{Action, ChatStore, LoadError};

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn default_store_holds_the_demo_session() {
    let store = ChatStore::default();
    let chat = store.state();

    let ids: Vec<&str> = chat.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
    assert_eq!(chat.message("3").unwrap().feedback_type, Some(FeedbackType::Liked));
    assert_eq!(
        chat.replied_message(chat.message("5").unwrap()).map(|m| m.sender),
        Some(Sender::HumanAstrologer)
    );
    assert!(chat.messages.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    assert!(chat.reply_to.is_none());
    assert!(!chat.show_rating_modal);
    assert_eq!(chat.rating, 0);
    assert!(!chat.is_reacting());
}

#[test]
fn send_message_stamps_id_time_and_staged_reply() {
    let mut store = ChatStore::default();
    let target = store.state().message("4").cloned().unwrap();
    store.set_reply(Some(target));

    let first = store.send_message("thank you");
    let second = store.send_message("one more thing");
    assert_ne!(first, second);

    let chat = store.state();
    assert_eq!(chat.messages.len(), 8);
    let sent = chat.message(&first).unwrap();
    assert_eq!(sent.sender, Sender::User);
    assert_eq!(sent.text, "thank you");
    assert_eq!(sent.reply_to.as_deref(), Some("4"));
    assert!(sent.timestamp > default_seed()[5].timestamp);

    // The reply target is consumed by the first send.
    assert!(chat.message(&second).unwrap().reply_to.is_none());
    assert!(chat.reply_to.is_none());
}

#[test]
fn facade_methods_forward_to_the_reducer() {
    let mut store = ChatStore::default();

    store.set_selected_message(Some("6".into()));
    store.toggle_feedback_options();
    store.add_reaction("6", "🙏");
    store.add_reaction("6", "🙏");
    store.update_message_feedback(
        "6",
        Some(FeedbackType::Disliked),
        Some(Some(DislikeReason::TooLong)),
    );
    store.set_reacting_to_message("2", None);

    let chat = store.state();
    assert_eq!(chat.selected_message_id.as_deref(), Some("6"));
    assert!(chat.show_feedback_options);
    let six = chat.message("6").unwrap();
    assert_eq!(six.reaction_counts(), [("🙏", 2)]);
    assert_eq!(six.dislike_reason, Some(DislikeReason::TooLong));
    assert_eq!(chat.reacting_to_message.message_id, "2");

    store.set_reacting_to_message("", None);
    assert!(!store.state().is_reacting());
}

#[test]
fn legacy_feedback_cross_writes_the_message() {
    let mut store = ChatStore::default();

    store.set_feedback(Some("6".into()), Some(DislikeReason::Inaccurate));
    let chat = store.state();
    assert_eq!(chat.feedback.message_id.as_deref(), Some("6"));
    assert_eq!(chat.feedback.reason, Some(DislikeReason::Inaccurate));
    assert_eq!(chat.message("6").unwrap().feedback_type, Some(FeedbackType::Disliked));

    store.set_feedback(Some("3".into()), None);
    let three = store.state().message("3").unwrap();
    assert_eq!(three.feedback_type, None);
    assert_eq!(three.dislike_reason, None);
}

#[test]
fn rating_flow_resets_on_reopen() {
    let mut store = ChatStore::default();
    store.toggle_rating_modal();
    store.set_rating(4);
    store.toggle_rating_modal();
    assert_eq!(store.state().rating, 4);
    assert!(!store.state().show_rating_modal);

    store.toggle_rating_modal();
    assert!(store.state().show_rating_modal);
    assert_eq!(store.state().rating, 0);

    store.set_rating(9);
    assert_eq!(store.state().rating, 5);
}

#[test]
fn subscribers_see_every_dispatch_and_drop_out_cleanly() {
    let mut store = ChatStore::default();
    let kept = store.subscribe();
    let dropped = store.subscribe();
    drop(dropped);

    store.send_message("first");
    store.toggle_feedback_options();

    let snapshots: Vec<_> = kept.try_iter().collect();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].messages.len(), 7);
    assert!(!snapshots[0].show_feedback_options);
    assert!(snapshots[1].show_feedback_options);
    assert_eq!(*snapshots[1], *store.state());
}

#[test]
fn seed_file_loads_with_legacy_reason_spelling() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "seed.toml",
        r#"
[[messages]]
id = "a"
sender = "system"
type = "event"
text = "Session started"
timestamp = 1

[[messages]]
id = "b"
sender = "ai_astrologer"
type = "ai"
text = "Mars is strong this month."
timestamp = 2
feedbackType = "disliked"
dislikeReason = "tooVague"
reactions = ["🔥", "🔥"]

[[messages]]
id = "c"
sender = "user"
type = "text"
text = "Why?"
timestamp = 3
replyTo = "b"
"#,
    );

    let messages = load_seed(&path).unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].dislike_reason, Some(DislikeReason::TooVague));
    assert_eq!(messages[1].reactions, ["🔥", "🔥"]);
    assert_eq!(messages[2].reply_to.as_deref(), Some("b"));

    let store = ChatStore::new(messages);
    let chat = store.state();
    assert_eq!(chat.replied_message(&chat.messages[2]).unwrap().id, "b");
}

#[test]
fn seed_rejects_duplicate_ids() {
    let raw = r#"
[[messages]]
id = "x"
sender = "user"
type = "text"
text = "one"
timestamp = 1

[[messages]]
id = "x"
sender = "user"
type = "text"
text = "two"
timestamp = 2
"#;
    match parse_seed(raw, Path::new("dup.toml")) {
        Err(LoadError::DuplicateId { id }) => assert_eq!(id, "x"),
        other => panic!("expected DuplicateId, got {other:?}"),
    }
}

#[test]
fn loader_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.toml");
    let err = load_seed(&missing).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("missing.toml"));

    let bad = write(&dir, "bad.toml", "[[messages]]\nid = 3\n");
    let err = load_seed(&bad).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn script_replays_in_order_and_skips_unknown_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "script.toml",
        r#"
[[actions]]
type = "ADD_REACTION"
payload = { messageId = "2", emoji = "❤️" }

[[actions]]
type = "SHARE_CHART"

[[actions]]
type = "UPDATE_MESSAGE_FEEDBACK"
payload = { messageId = "6", feedbackType = "disliked", dislikeReason = "inaccurate" }

[[actions]]
type = "TOGGLE_RATING_MODAL"

[[actions]]
type = "SET_RATING"
payload = 3
"#,
    );

    let actions = load_actions(&path).unwrap();
    assert_eq!(actions.len(), 5);
    assert_eq!(actions[1], Action::Unknown);

    let mut store = ChatStore::default();
    store.replay(actions).unwrap();

    let chat = store.state();
    assert_eq!(chat.message("2").unwrap().reactions, ["❤️"]);
    assert_eq!(chat.message("6").unwrap().dislike_reason, Some(DislikeReason::Inaccurate));
    assert!(chat.show_rating_modal);
    assert_eq!(chat.rating, 3);
}

#[test]
fn scripted_dislike_without_reason_keeps_the_existing_one() {
    let raw = r#"
[[actions]]
type = "UPDATE_MESSAGE_FEEDBACK"
payload = { messageId = "6", feedbackType = "disliked", dislikeReason = "too_long" }

[[actions]]
type = "UPDATE_MESSAGE_FEEDBACK"
payload = { messageId = "6", feedbackType = "disliked" }
"#;
    let mut store = ChatStore::default();
    store
        .replay(parse_actions(raw, Path::new("inline.toml")).unwrap())
        .unwrap();
    assert_eq!(
        store.state().message("6").unwrap().dislike_reason,
        Some(DislikeReason::TooLong)
    );
}

#[test]
fn seed_rejects_a_reason_on_a_message_that_is_not_disliked() {
    let raw = r#"
[[messages]]
id = "r"
sender = "ai_astrologer"
type = "ai"
text = "Venus favours you."
timestamp = 1
feedbackType = "liked"
dislikeReason = "too_long"

[[messages]]
id = "s"
sender = "ai_astrologer"
type = "ai"
text = "Jupiter is retrograde."
timestamp = 2
dislikeReason = "inaccurate"
"#;
    match parse_seed(raw, Path::new("stray.toml")) {
        Err(LoadError::StrayDislikeReason { id }) => assert_eq!(id, "r"),
        other => panic!("expected StrayDislikeReason, got {other:?}"),
    }

    let first_fixed = raw.replace("feedbackType = \"liked\"\n", "feedbackType = \"disliked\"\n");
    match parse_seed(&first_fixed, Path::new("stray.toml")) {
        Err(LoadError::StrayDislikeReason { id }) => assert_eq!(id, "s"),
        other => panic!("expected StrayDislikeReason, got {other:?}"),
    }
}

#[test]
fn replay_rejects_sends_that_reuse_an_id() {
    let reused_from_seed = r#"
[[actions]]
type = "ADD_REACTION"
payload = { messageId = "2", emoji = "🙏" }

[[actions]]
type = "SEND_MESSAGE"
payload = { id = "3", sender = "user", type = "text", text = "again", timestamp = 9 }
"#;
    let mut store = ChatStore::default();
    let before = store.state().clone();
    match store.replay(parse_actions(reused_from_seed, Path::new("reuse.toml")).unwrap()) {
        Err(LoadError::DuplicateId { id }) => assert_eq!(id, "3"),
        other => panic!("expected DuplicateId, got {other:?}"),
    }
    assert_eq!(*store.state(), before, "a rejected script applies nothing");

    let reused_within_script = r#"
[[actions]]
type = "SEND_MESSAGE"
payload = { id = "7", sender = "user", type = "text", text = "one", timestamp = 9 }

[[actions]]
type = "SEND_MESSAGE"
payload = { id = "7", sender = "user", type = "text", text = "two", timestamp = 10 }
"#;
    let err = store
        .replay(parse_actions(reused_within_script, Path::new("reuse.toml")).unwrap())
        .unwrap_err();
    assert!(matches!(err, LoadError::DuplicateId { ref id } if id == "7"));
    assert_eq!(store.state().messages.len(), 6);

    let fresh = r#"
[[actions]]
type = "SEND_MESSAGE"
payload = { id = "7", sender = "user", type = "text", text = "one", timestamp = 9 }
"#;
    store
        .replay(parse_actions(fresh, Path::new("fresh.toml")).unwrap())
        .unwrap();
    assert_eq!(
        store.state().messages.iter().filter(|m| m.id == "7").count(),
        1
    );
}

#[test]
fn script_feedback_reason_distinguishes_absent_from_given() {
    let raw = r#"
[[actions]]
type = "UPDATE_MESSAGE_FEEDBACK"
payload = { messageId = "6", feedbackType = "disliked" }

[[actions]]
type = "UPDATE_MESSAGE_FEEDBACK"
payload = { messageId = "6", feedbackType = "disliked", dislikeReason = "too_vague" }

[[actions]]
type = "UPDATE_MESSAGE_FEEDBACK"
payload = { messageId = "6" }
"#;
    let actions = parse_actions(raw, Path::new("feedback.toml")).unwrap();
    assert_eq!(
        actions,
        [
            Action::UpdateMessageFeedback {
                message_id: "6".into(),
                feedback_type: Some(FeedbackType::Disliked),
                dislike_reason: None,
            },
            Action::UpdateMessageFeedback {
                message_id: "6".into(),
                feedback_type: Some(FeedbackType::Disliked),
                dislike_reason: Some(Some(DislikeReason::TooVague)),
            },
            Action::UpdateMessageFeedback {
                message_id: "6".into(),
                feedback_type: None,
                dislike_reason: None,
            },
        ]
    );
}
