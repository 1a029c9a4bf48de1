use thiserror::Error;

use crate::{ChangeOutcome, ParseModeError};

/// Error type for listing and changing display modes
#[derive(Error, Debug)]
pub enum DisplayModeError {
    #[error("Display not found: {0}")]
    DisplayNotFound(usize),
    #[error("Failed to obtain current settings of display {0}")]
    QueryFailed(String),
    #[error("Invalid mode string: {mode}")]
    InvalidModeString {
        mode: String,
        #[source]
        source: ParseModeError,
    },
    #[error("Failed to change display settings: {0}")]
    ModeChangeFailed(ChangeOutcome),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Missing arguments")]
    MissingArguments,
    #[error("Changing display modes is only supported on Windows")]
    Unsupported,
    #[error("Failed to write output")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize output")]
    Json(#[from] serde_json::Error),
}

pub type DisplayModeResult<T = ()> = std::result::Result<T, DisplayModeError>;
