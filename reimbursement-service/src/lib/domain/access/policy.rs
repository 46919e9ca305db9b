//! Pure role checks. No IO, no panics; the caller supplies the role.

use crate::domain::access::errors::AccessError;
use crate::domain::ticket::models::Ticket;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

pub fn can_update_ticket(role: Role) -> Result<(), AccessError> {
    match role {
        Role::Manager => Ok(()),
        Role::Employee => Err(AccessError::EmployeesCannotProcess),
    }
}

/// An employee with no author filter is allowed through: a status-only query
/// returns every author's tickets, not just the caller's.
pub fn can_view_tickets(
    role: Role,
    caller: &UserId,
    requested_author: Option<&UserId>,
) -> Result<(), AccessError> {
    match (role, requested_author) {
        (Role::Manager, _) => Ok(()),
        (Role::Employee, Some(author)) if author != caller => {
            Err(AccessError::NotAuthorizedToView)
        }
        (Role::Employee, _) => Ok(()),
    }
}

pub fn can_read_ticket(role: Role, caller: &UserId, ticket: &Ticket) -> Result<(), AccessError> {
    can_view_tickets(role, caller, Some(&ticket.author))
}
