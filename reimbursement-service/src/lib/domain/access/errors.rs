use thiserror::Error;

/// Reasons a ticket operation is denied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Employees cannot process requests.")]
    EmployeesCannotProcess,

    #[error("You are not authorized to view these tickets.")]
    NotAuthorizedToView,

    /// Caller's role could not be looked up (deleted account or store failure).
    #[error("Forbidden access")]
    UnknownCaller(String),
}
