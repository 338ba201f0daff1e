//! Error type shared across Scriptgate crates.

use std::io;
use std::path::PathBuf;

use crate::types::PageId;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for script loading, injection and bridge delivery.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Script directory '{}' is unreadable: {source}", path.display())]
    DirectoryUnreadable { path: PathBuf, source: io::Error },
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("Page {0} is gone")]
    PageGone(PageId),
    #[error("Rendering engine rejected request: {0}")]
    Engine(String),
    #[error("Invalid bridge message: {0}")]
    Bridge(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True when the error only says the target page has already closed.
    pub fn is_page_gone(&self) -> bool {
        matches!(self, Self::PageGone(_))
    }
}
