use async_trait::async_trait;

use crate::domain::ticket::errors::TicketError;
use crate::domain::ticket::models::CreateTicketCommand;
use crate::domain::ticket::models::Ticket;
use crate::domain::ticket::models::TicketFilter;
use crate::domain::ticket::models::TicketId;
use crate::domain::ticket::models::TicketStatus;
use crate::domain::ticket::models::UpdateTicketCommand;
use crate::domain::user::models::UserId;

/// Port for the ticket approval workflow.
#[async_trait]
pub trait TicketServicePort: Send + Sync + 'static {
    /// Submit a new ticket on behalf of `author`.
    ///
    /// # Arguments
    /// * `command` - Validated submission fields
    /// * `author` - Authenticated caller; never taken from the request body
    ///
    /// # Returns
    /// The persisted ticket with its generated id, status `Pending` unless
    /// the command supplied one
    ///
    /// # Errors
    /// * `StorageFailure` - Store operation failed
    async fn create_ticket(
        &self,
        command: CreateTicketCommand,
        author: &UserId,
    ) -> Result<Ticket, TicketError>;

    /// Retrieve ticket by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Ticket does not exist
    /// * `StorageFailure` - Store operation failed
    async fn get_ticket(&self, id: &TicketId) -> Result<Ticket, TicketError>;

    /// Tickets submitted by `author`, oldest first. Empty is not an error.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Ticket>, TicketError>;

    /// Tickets currently in `status`, oldest first. Empty is not an error.
    async fn list_by_status(&self, status: &TicketStatus) -> Result<Vec<Ticket>, TicketError>;

    /// Overwrite ticket fields and record `resolver` as the last resolver.
    ///
    /// Existence is checked with a read before the write; the two are not
    /// atomic, so concurrent updates to one ticket resolve last-writer-wins.
    ///
    /// # Errors
    /// * `NotFound` - Ticket does not exist (or vanished before the write)
    /// * `StorageFailure` - Store operation failed
    async fn update_ticket(
        &self,
        id: &TicketId,
        command: UpdateTicketCommand,
        resolver: &UserId,
    ) -> Result<Ticket, TicketError>;
}

/// Persistence operations for tickets. The adapter is the single writer.
#[async_trait]
pub trait TicketRepository: Send + Sync + 'static {
    /// Persist a new ticket.
    async fn create(&self, ticket: Ticket) -> Result<Ticket, TicketError>;

    /// Retrieve ticket by identifier.
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketError>;

    /// Tickets matching the filter, ordered by creation time.
    async fn scan(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketError>;

    /// Apply a partial overwrite and return the new record, or `None` when
    /// no ticket has this id.
    async fn update(
        &self,
        id: &TicketId,
        command: &UpdateTicketCommand,
    ) -> Result<Option<Ticket>, TicketError>;

    /// Remove a ticket, returning its id when something was deleted.
    async fn delete_by_id(&self, id: &TicketId) -> Result<Option<TicketId>, TicketError>;
}
