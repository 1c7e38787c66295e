use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VcsError {
    #[error("git is not available on this system")]
    GitNotAvailable,

    #[error("path is not a git repository: {0}")]
    NotARepository(PathBuf),

    #[error("git command failed: {0}")]
    CommandFailed(String),

    #[error("malformed commit log line: '{0}'")]
    MalformedLog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type VcsResult<T> = Result<T, VcsError>;
