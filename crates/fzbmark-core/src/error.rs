use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid bookmark record: {0}")]
    InvalidRecord(String),

    #[error("Cannot decode selection: {0}")]
    Decode(String),

    #[error("Unknown browser '{0}' (expected one of: firefox, chrome, chromium, brave)")]
    UnknownBrowser(String),
}

pub type Result<T> = std::result::Result<T, Error>;
