use thiserror::Error;

/// Error for token issuance and verification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed, expired, or missing identity claims.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Failed to issue token: {0}")]
    IssueFailed(String),
}
