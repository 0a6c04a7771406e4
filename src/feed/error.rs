//! Feed pipeline errors.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Channel options unusable; aborts the build.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// One document could not become an item; the item is skipped.
    #[error("skipped `{}`: {reason}", path.display())]
    ItemExtraction { path: PathBuf, reason: String },

    /// Output could not be produced; aborts the build.
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("IO error when reading `{path}`: {1}", path = .0.display())]
    Io(PathBuf, #[source] std::io::Error),
}

impl FeedError {
    pub fn item(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::ItemExtraction {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Whether the pipeline may drop the offending item and keep going.
    pub fn is_item_error(&self) -> bool {
        matches!(self, Self::ItemExtraction { .. } | Self::Io(..))
    }
}
