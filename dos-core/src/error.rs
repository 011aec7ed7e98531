//! Error types for the DOS simulator.

use thiserror::Error;

/// Errors that can occur while manipulating a drive or dispatching commands.
#[derive(Error, Debug)]
pub enum DosError {
    #[error("Error: A file or directory name may not contain '/', '\\', ',' or ' ': {0}")]
    InvalidName(String),

    #[error("Invalid drive: {0}")]
    InvalidDrive(char),

    #[error("Node does not belong to this drive")]
    InvalidNode,

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Cannot move {0} into itself or one of its subdirectories")]
    CyclicMove(String),

    /// Dispatcher bug: a command was checked before its parameters were set.
    #[error("Parameters checked before set: {0}")]
    ParametersNotSet(String),

    #[error("Command executed before its parameters were checked: {0}")]
    NotChecked(String),

    #[error("Command reused without reset: {0}")]
    NotReset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for DOS operations.
pub type DosResult<T> = Result<T, DosError>;
