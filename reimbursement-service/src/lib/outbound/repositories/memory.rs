//! Process-local stores for tests and for running without a database.
//!
//! Records are kept in insertion order, which is also creation order, so scans
//! come back oldest first like the Postgres adapters. Like the document store
//! they stand in for, neither store enforces username uniqueness.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ticket::errors::TicketError;
use crate::domain::ticket::models::Ticket;
use crate::domain::ticket::models::TicketFilter;
use crate::domain::ticket::models::TicketId;
use crate::domain::ticket::models::UpdateTicketCommand;
use crate::domain::ticket::ports::TicketRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn remove_first(&self, matches: impl Fn(&User) -> bool) -> Option<User> {
        let mut users = self.users.write().await;
        let index = users.iter().position(matches)?;
        Some(users.remove(index))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == *username).cloned())
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.remove_first(|u| u.id == *id).await)
    }

    async fn delete_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self.remove_first(|u| u.username == *username).await)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTicketRepository {
    tickets: RwLock<Vec<Ticket>>,
}

impl InMemoryTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn create(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        self.tickets.write().await.push(ticket.clone());
        Ok(ticket)
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketError> {
        let tickets = self.tickets.read().await;
        Ok(tickets.iter().find(|t| t.id == *id).cloned())
    }

    async fn scan(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketError> {
        let tickets = self.tickets.read().await;
        Ok(tickets.iter().filter(|t| filter.matches(t)).cloned().collect())
    }

    async fn update(
        &self,
        id: &TicketId,
        command: &UpdateTicketCommand,
    ) -> Result<Option<Ticket>, TicketError> {
        let mut tickets = self.tickets.write().await;
        Ok(tickets.iter_mut().find(|t| t.id == *id).map(|ticket| {
            command.apply(ticket);
            ticket.clone()
        }))
    }

    async fn delete_by_id(&self, id: &TicketId) -> Result<Option<TicketId>, TicketError> {
        let mut tickets = self.tickets.write().await;
        let Some(index) = tickets.iter().position(|t| t.id == *id) else {
            return Ok(None);
        };
        Ok(Some(tickets.remove(index).id))
    }
}
