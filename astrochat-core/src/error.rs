use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading a seed or applying an action script.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// Two messages would share an id, in a seed file or via a scripted send.
    #[error("duplicate message id {id:?}")]
    DuplicateId { id: String },
    /// A seed message carries a `dislikeReason` without being disliked.
    #[error("message {id:?} has a dislike reason but is not disliked")]
    StrayDislikeReason { id: String },
}
