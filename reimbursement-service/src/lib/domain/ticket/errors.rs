use thiserror::Error;

/// Error for TicketId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TicketIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Reasons a ticket submission is rejected before it reaches storage.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TicketInputError {
    #[error("Requests cannot be submitted without an amount.")]
    MissingAmount,

    #[error("Request amount must be a positive number.")]
    NonPositiveAmount(f64),

    #[error("Requests cannot be submitted without a description.")]
    MissingDescription,
}

/// Top-level error for ticket workflow operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TicketError {
    #[error("Invalid ticket input: {0}")]
    InvalidInput(#[from] TicketInputError),

    #[error("Invalid ticket ID: {0}")]
    InvalidTicketId(#[from] TicketIdError),

    #[error("Ticket not found: {0}")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),
}
