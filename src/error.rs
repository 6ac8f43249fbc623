//! Error types.
//!
//! `AppError` is what the binary reports: a message plus a process exit code.
//!
//! | code | meaning                                               |
//! |------|-------------------------------------------------------|
//! | 1    | unexpected failure                                    |
//! | 2    | configuration / input / output (args, files, creds)   |
//! | 3    | the source returned no data                           |
//! | 4    | remote source failure (auth, transport, API, payload) |

use thiserror::Error;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn unexpected(detail: impl std::fmt::Display) -> Self {
        Self::new(1, format!("Unexpected error while processing data: {detail}"))
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Why a row source could not produce a table.
///
/// A source error aborts the whole batch; no partial table is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Spreadsheet credentials not found: {0}")]
    MissingCredentials(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not authorized to read {0}")]
    Unauthorized(String),

    #[error("Could not reach {0}")]
    Transport(String),

    #[error("Spreadsheet API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed source data: {0}")]
    Malformed(String),

    #[error("No data found in {0}.")]
    Empty(String),
}

impl SourceError {
    pub fn exit_code(&self) -> u8 {
        match self {
            SourceError::MissingCredentials(_) | SourceError::NotFound(_) => 2,
            SourceError::Empty(_) => 3,
            SourceError::Unauthorized(_)
            | SourceError::Transport(_)
            | SourceError::Api { .. }
            | SourceError::Malformed(_) => 4,
        }
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}
