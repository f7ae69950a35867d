//! Replayable action lists.
//!
//! A script is a TOML file of `[[actions]]` entries in the serialized form of
//! [`Action`]:
//!
//! ```toml
//! [[actions]]
//! type = "ADD_REACTION"
//! payload = { messageId = "2", emoji = "❤️" }
//!
//! [[actions]]
//! type = "TOGGLE_RATING_MODAL"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::action::Action;
use crate::error::LoadError;

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    actions: Vec<Action>,
}

/// Parses an action script from TOML text. `path` labels errors.
pub fn parse_actions(raw: &str, path: &Path) -> Result<Vec<Action>, LoadError> {
    let file: ScriptFile = toml::from_str(raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let unknown = file
        .actions
        .iter()
        .filter(|a| matches!(a, Action::Unknown))
        .count();
    if unknown > 0 {
        tracing::warn!(path = %path.display(), unknown, "script contains unrecognised action types");
    }
    Ok(file.actions)
}

/// Reads and parses an action script.
///
/// # Errors
///
/// Returns [`LoadError::Io`] or [`LoadError::Parse`].
pub fn load_actions(path: impl AsRef<Path>) -> Result<Vec<Action>, LoadError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_actions(&raw, path)
}
