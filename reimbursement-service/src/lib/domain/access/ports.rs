use async_trait::async_trait;

use crate::domain::access::errors::AccessError;
use crate::domain::ticket::models::Ticket;
use crate::domain::user::models::UserId;

/// Role-based checks for ticket operations.
///
/// Every check resolves the caller's current role from the credential store
/// first; a failed lookup is a denial.
#[async_trait]
pub trait AccessPolicyPort: Send + Sync + 'static {
    /// Only managers may transition tickets.
    ///
    /// # Errors
    /// * `EmployeesCannotProcess` - Caller is not a manager
    /// * `UnknownCaller` - Role lookup failed
    async fn authorize_ticket_update(&self, caller: &UserId) -> Result<(), AccessError>;

    /// Managers may list anything; employees only their own authorship.
    ///
    /// # Errors
    /// * `NotAuthorizedToView` - Employee asked for another author's tickets
    /// * `UnknownCaller` - Role lookup failed
    async fn authorize_ticket_view(
        &self,
        caller: &UserId,
        requested_author: Option<&UserId>,
    ) -> Result<(), AccessError>;

    /// Managers may read any ticket; employees only tickets they authored.
    ///
    /// # Errors
    /// * `NotAuthorizedToView` - Employee is not the ticket's author
    /// * `UnknownCaller` - Role lookup failed
    async fn authorize_ticket_read(&self, caller: &UserId, ticket: &Ticket)
        -> Result<(), AccessError>;
}
