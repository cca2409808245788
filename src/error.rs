//! Error types for the shared_with_me crate.

use thiserror::Error;

/// Errors that can occur when talking to Google Drive.
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Failed to read credentials file: {0}")]
    CredentialsFileError(#[from] std::io::Error),

    #[error("Failed to parse credentials JSON: {0}")]
    CredentialsParseError(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("JWT encoding error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Remote repeated page token: {0}")]
    RepeatedPageToken(String),
}

impl DriveError {
    /// Whether this error came out of obtaining a session.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            DriveError::AuthenticationError(_)
                | DriveError::CredentialsFileError(_)
                | DriveError::CredentialsParseError(_)
                | DriveError::JwtError(_)
        )
    }
}

/// Result type alias for DriveError.
pub type Result<T> = std::result::Result<T, DriveError>;
