use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ticket::errors::TicketError;
use crate::domain::ticket::models::CreateTicketCommand;
use crate::domain::ticket::models::Ticket;
use crate::domain::ticket::models::TicketFilter;
use crate::domain::ticket::models::TicketId;
use crate::domain::ticket::models::TicketStatus;
use crate::domain::ticket::models::UpdateTicketCommand;
use crate::domain::ticket::ports::TicketRepository;
use crate::domain::ticket::ports::TicketServicePort;
use crate::domain::user::models::UserId;

/// Ticket workflow: submission defaults, update transitions, lookups.
pub struct TicketService<TR>
where
    TR: TicketRepository,
{
    repository: Arc<TR>,
}

impl<TR> TicketService<TR>
where
    TR: TicketRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }

    async fn list(&self, filter: TicketFilter) -> Result<Vec<Ticket>, TicketError> {
        self.repository.scan(&filter).await.map_err(|e| {
            tracing::error!(filter = ?filter, error = %e, "Failed to scan tickets");
            e
        })
    }
}

#[async_trait]
impl<TR> TicketServicePort for TicketService<TR>
where
    TR: TicketRepository,
{
    async fn create_ticket(
        &self,
        command: CreateTicketCommand,
        author: &UserId,
    ) -> Result<Ticket, TicketError> {
        let ticket = Ticket {
            id: TicketId::new(),
            author: *author,
            description: command.description,
            amount: command.amount,
            ticket_type: command.ticket_type,
            // Submitters may pick their own initial status.
            status: command.status.unwrap_or_default(),
            resolver: None,
            created_at: Utc::now(),
        };

        let created = self.repository.create(ticket).await.map_err(|e| {
            tracing::error!(author = %author, error = %e, "Failed to create ticket");
            e
        })?;

        tracing::info!(
            ticket_id = %created.id,
            author = %created.author,
            status = %created.status,
            "Ticket created"
        );
        Ok(created)
    }

    async fn get_ticket(&self, id: &TicketId) -> Result<Ticket, TicketError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| {
                tracing::error!(ticket_id = %id, error = %e, "Failed to retrieve ticket");
                e
            })?
            .ok_or(TicketError::NotFound(id.to_string()))
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Ticket>, TicketError> {
        self.list(TicketFilter::Author(*author)).await
    }

    async fn list_by_status(&self, status: &TicketStatus) -> Result<Vec<Ticket>, TicketError> {
        self.list(TicketFilter::Status(status.clone())).await
    }

    async fn update_ticket(
        &self,
        id: &TicketId,
        command: UpdateTicketCommand,
        resolver: &UserId,
    ) -> Result<Ticket, TicketError> {
        let existing = self.repository.find_by_id(id).await.map_err(|e| {
            tracing::error!(ticket_id = %id, error = %e, "Failed to retrieve ticket for update");
            e
        })?;
        if existing.is_none() {
            tracing::info!(ticket_id = %id, "Update rejected, ticket not found");
            return Err(TicketError::NotFound(id.to_string()));
        }

        let command = command.with_resolver(*resolver);

        let updated = self
            .repository
            .update(id, &command)
            .await
            .map_err(|e| {
                tracing::error!(ticket_id = %id, error = %e, "Failed to update ticket");
                e
            })?
            .ok_or(TicketError::NotFound(id.to_string()))?;

        tracing::info!(
            ticket_id = %updated.id,
            resolver = %resolver,
            status = %updated.status,
            "Ticket updated"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;

    mock! {
        pub TestTicketRepository {}

        #[async_trait]
        impl TicketRepository for TestTicketRepository {
            async fn create(&self, ticket: Ticket) -> Result<Ticket, TicketError>;
            async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketError>;
            async fn scan(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketError>;
            async fn update(&self, id: &TicketId, command: &UpdateTicketCommand) -> Result<Option<Ticket>, TicketError>;
            async fn delete_by_id(&self, id: &TicketId) -> Result<Option<TicketId>, TicketError>;
        }
    }

    fn stored_ticket(author: UserId, status: TicketStatus) -> Ticket {
        Ticket {
            id: TicketId::new(),
            author,
            description: "hotel".to_string(),
            amount: 250.0,
            ticket_type: Some("Lodging".to_string()),
            status,
            resolver: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_ticket_defaults_to_pending() {
        let mut repository = MockTestTicketRepository::new();
        let author = UserId::new();

        repository
            .expect_create()
            .withf(move |ticket| ticket.author == author && ticket.status == TicketStatus::Pending)
            .times(1)
            .returning(|ticket| Ok(ticket));

        let service = TicketService::new(Arc::new(repository));

        let command =
            CreateTicketCommand::new(Some("trip".to_string()), Some(42.0), None, None).unwrap();
        let ticket = service.create_ticket(command, &author).await.unwrap();

        assert_eq!(ticket.status, TicketStatus::Pending);
        assert_eq!(ticket.author, author);
        assert_eq!(ticket.amount, 42.0);
        assert!(ticket.resolver.is_none());
    }

    #[tokio::test]
    async fn test_create_ticket_keeps_supplied_status() {
        let mut repository = MockTestTicketRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|ticket| Ok(ticket));

        let service = TicketService::new(Arc::new(repository));

        let command = CreateTicketCommand::new(
            Some("trip".to_string()),
            Some(42.0),
            Some("Travel".to_string()),
            Some(TicketStatus::Approved),
        )
        .unwrap();
        let ticket = service.create_ticket(command, &UserId::new()).await.unwrap();

        assert_eq!(ticket.status, TicketStatus::Approved);
        assert_eq!(ticket.ticket_type.as_deref(), Some("Travel"));
    }

    #[tokio::test]
    async fn test_create_ticket_storage_failure_propagates() {
        let mut repository = MockTestTicketRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(TicketError::StorageFailure("timeout".to_string())));

        let service = TicketService::new(Arc::new(repository));

        let command =
            CreateTicketCommand::new(Some("trip".to_string()), Some(42.0), None, None).unwrap();
        let result = service.create_ticket(command, &UserId::new()).await;

        assert!(matches!(result, Err(TicketError::StorageFailure(_))));
    }

    #[tokio::test]
    async fn test_get_ticket_not_found() {
        let mut repository = MockTestTicketRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = TicketService::new(Arc::new(repository));

        let result = service.get_ticket(&TicketId::new()).await;
        assert!(matches!(result, Err(TicketError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_by_author_uses_author_filter() {
        let mut repository = MockTestTicketRepository::new();
        let author = UserId::new();
        let returned = vec![stored_ticket(author, TicketStatus::Pending)];

        repository
            .expect_scan()
            .withf(move |filter| *filter == TicketFilter::Author(author))
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let service = TicketService::new(Arc::new(repository));

        let tickets = service.list_by_author(&author).await.unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].author, author);
    }

    #[tokio::test]
    async fn test_list_by_status_empty_is_ok() {
        let mut repository = MockTestTicketRepository::new();

        repository
            .expect_scan()
            .withf(|filter| *filter == TicketFilter::Status(TicketStatus::Denied))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = TicketService::new(Arc::new(repository));

        let tickets = service.list_by_status(&TicketStatus::Denied).await.unwrap();
        assert!(tickets.is_empty());
    }

    #[tokio::test]
    async fn test_update_ticket_sets_resolver() {
        let mut repository = MockTestTicketRepository::new();
        let existing = stored_ticket(UserId::new(), TicketStatus::Pending);
        let ticket_id = existing.id;
        let manager = UserId::new();

        let found = existing.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let current = existing.clone();
        repository
            .expect_update()
            .withf(move |id, command| {
                *id == ticket_id
                    && command.resolver == Some(manager)
                    && command.status == Some(TicketStatus::Approved)
            })
            .times(1)
            .returning(move |_, command| {
                let mut ticket = current.clone();
                command.apply(&mut ticket);
                Ok(Some(ticket))
            });

        let service = TicketService::new(Arc::new(repository));

        let command = UpdateTicketCommand {
            status: Some(TicketStatus::Approved),
            ..Default::default()
        };
        let updated = service
            .update_ticket(&ticket_id, command, &manager)
            .await
            .unwrap();

        assert_eq!(updated.status, TicketStatus::Approved);
        assert_eq!(updated.resolver, Some(manager));
        assert_eq!(updated.author, existing.author);
    }

    #[tokio::test]
    async fn test_update_ticket_resolver_cannot_be_spoofed() {
        let mut repository = MockTestTicketRepository::new();
        let existing = stored_ticket(UserId::new(), TicketStatus::Pending);
        let manager = UserId::new();

        let found = existing.clone();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        repository
            .expect_update()
            .withf(move |_, command| command.resolver == Some(manager))
            .times(1)
            .returning(|_, _| Ok(None));

        let service = TicketService::new(Arc::new(repository));

        let command = UpdateTicketCommand {
            resolver: Some(UserId::new()),
            ..Default::default()
        };
        let result = service.update_ticket(&existing.id, command, &manager).await;

        // Row vanished between the read and the write.
        assert!(matches!(result, Err(TicketError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_ticket_not_found_skips_write() {
        let mut repository = MockTestTicketRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = TicketService::new(Arc::new(repository));

        let result = service
            .update_ticket(
                &TicketId::new(),
                UpdateTicketCommand::default(),
                &UserId::new(),
            )
            .await;

        assert!(matches!(result, Err(TicketError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_ticket_read_failure_propagates() {
        let mut repository = MockTestTicketRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(TicketError::StorageFailure("connection reset".to_string())));
        repository.expect_update().times(0);

        let service = TicketService::new(Arc::new(repository));

        let result = service
            .update_ticket(
                &TicketId::new(),
                UpdateTicketCommand::default(),
                &UserId::new(),
            )
            .await;

        assert_eq!(
            result,
            Err(TicketError::StorageFailure("connection reset".to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_ticket_write_failure_propagates() {
        let mut repository = MockTestTicketRepository::new();
        let existing = stored_ticket(UserId::new(), TicketStatus::Pending);

        let found = existing.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        repository
            .expect_update()
            .times(1)
            .returning(|_, _| Err(TicketError::StorageFailure("disk full".to_string())));

        let service = TicketService::new(Arc::new(repository));

        let command = UpdateTicketCommand {
            status: Some(TicketStatus::Denied),
            ..Default::default()
        };
        let result = service
            .update_ticket(&existing.id, command, &UserId::new())
            .await;

        assert_eq!(
            result,
            Err(TicketError::StorageFailure("disk full".to_string()))
        );
    }
}
