//! Request-time errors of the command service.

use crate::protocol::ParseError;
use crate::storage::StoreError;
use axum::http::StatusCode;
use thiserror::Error;

/// Errors a single command can produce.
///
/// The `Display` text is the message shown to the client.
#[derive(Debug, Error)]
pub enum CommandError {
    /// `GET /command`
    #[error("Use POST method")]
    UsePost,

    /// POST body without a `command` field
    #[error("No command POSTed")]
    MissingCommand,

    /// Unparseable command text
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The SET was applied in memory but the backing file was not rewritten
    #[error("Failed to persist SET: {0}")]
    Persist(#[source] StoreError),
}

impl CommandError {
    /// Map error variant to the HTTP status code returned to the client
    pub fn status(&self) -> StatusCode {
        match self {
            CommandError::UsePost | CommandError::MissingCommand | CommandError::Parse(_) => {
                StatusCode::BAD_REQUEST
            }
            CommandError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true if the client sent something invalid.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}
