use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access::errors::AccessError;
use crate::domain::access::policy;
use crate::domain::access::ports::AccessPolicyPort;
use crate::domain::ticket::models::Ticket;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Access policy backed by a per-request role lookup in the credential store.
pub struct AccessService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
}

impl<UR> AccessService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>) -> Self {
        Self { users }
    }

    async fn current_role(&self, caller: &UserId) -> Result<Role, AccessError> {
        match self.users.find_by_id(caller).await {
            Ok(Some(user)) => Ok(user.role),
            Ok(None) => {
                tracing::warn!(user_id = %caller, "Caller no longer exists");
                Err(AccessError::UnknownCaller(caller.to_string()))
            }
            Err(e) => {
                tracing::error!(user_id = %caller, error = %e, "Role lookup failed");
                Err(AccessError::UnknownCaller(caller.to_string()))
            }
        }
    }
}

#[async_trait]
impl<UR> AccessPolicyPort for AccessService<UR>
where
    UR: UserRepository,
{
    async fn authorize_ticket_update(&self, caller: &UserId) -> Result<(), AccessError> {
        let role = self.current_role(caller).await?;
        policy::can_update_ticket(role).inspect_err(|_| {
            tracing::info!(user_id = %caller, role = %role, "Ticket update denied");
        })
    }

    async fn authorize_ticket_view(
        &self,
        caller: &UserId,
        requested_author: Option<&UserId>,
    ) -> Result<(), AccessError> {
        let role = self.current_role(caller).await?;
        policy::can_view_tickets(role, caller, requested_author).inspect_err(|_| {
            tracing::info!(user_id = %caller, role = %role, "Ticket listing denied");
        })
    }

    async fn authorize_ticket_read(
        &self,
        caller: &UserId,
        ticket: &Ticket,
    ) -> Result<(), AccessError> {
        let role = self.current_role(caller).await?;
        policy::can_read_ticket(role, caller, ticket).inspect_err(|_| {
            tracing::info!(user_id = %caller, ticket_id = %ticket.id, "Ticket read denied");
        })
    }
}
