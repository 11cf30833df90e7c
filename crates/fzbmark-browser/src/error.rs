use fzbmark_core::Browser;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{} not found (looked in: {searched})", .browser.display_name())]
    BrowserNotFound { browser: Browser, searched: String },

    #[error("Cannot read bookmark store {}: {reason}", .path.display())]
    StorageUnreadable { path: PathBuf, reason: String },

    #[error("Launch failed: {0}")]
    Launcher(String),

    #[error("Could not determine home directory")]
    HomeNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn unreadable(path: &std::path::Path, reason: impl ToString) -> Self {
        Error::StorageUnreadable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
