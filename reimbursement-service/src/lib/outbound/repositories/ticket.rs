use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::ticket::errors::TicketError;
use crate::domain::ticket::models::Ticket;
use crate::domain::ticket::models::TicketFilter;
use crate::domain::ticket::models::TicketId;
use crate::domain::ticket::models::TicketStatus;
use crate::domain::ticket::models::UpdateTicketCommand;
use crate::domain::ticket::ports::TicketRepository;
use crate::domain::user::models::UserId;

pub struct PostgresTicketRepository {
    pool: PgPool,
}

impl PostgresTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_ticket(row: &PgRow) -> Result<Ticket, TicketError> {
        let storage = |e: sqlx::Error| TicketError::StorageFailure(e.to_string());

        Ok(Ticket {
            id: TicketId(row.try_get("id").map_err(storage)?),
            author: UserId(row.try_get("author").map_err(storage)?),
            description: row.try_get("description").map_err(storage)?,
            amount: row.try_get("amount").map_err(storage)?,
            ticket_type: row.try_get("ticket_type").map_err(storage)?,
            status: TicketStatus::from(row.try_get::<String, _>("status").map_err(storage)?),
            resolver: row
                .try_get::<Option<Uuid>, _>("resolver")
                .map_err(storage)?
                .map(UserId),
            created_at: row.try_get("created_at").map_err(storage)?,
        })
    }

    fn rows_to_tickets(rows: Vec<PgRow>) -> Result<Vec<Ticket>, TicketError> {
        rows.iter().map(Self::row_to_ticket).collect()
    }
}

#[async_trait]
impl TicketRepository for PostgresTicketRepository {
    async fn create(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        sqlx::query(
            r#"
            INSERT INTO tickets (id, author, description, amount, ticket_type, status, resolver, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(ticket.id.0)
        .bind(ticket.author.0)
        .bind(&ticket.description)
        .bind(ticket.amount)
        .bind(ticket.ticket_type.as_deref())
        .bind(ticket.status.as_str())
        .bind(ticket.resolver.map(|r| r.0))
        .bind(ticket.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| TicketError::StorageFailure(e.to_string()))?;

        Ok(ticket)
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketError> {
        let row = sqlx::query(
            r#"
            SELECT id, author, description, amount, ticket_type, status, resolver, created_at
            FROM tickets
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TicketError::StorageFailure(e.to_string()))?;

        row.as_ref().map(Self::row_to_ticket).transpose()
    }

    async fn scan(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketError> {
        let rows = match filter {
            TicketFilter::Author(author) => {
                sqlx::query(
                    r#"
                    SELECT id, author, description, amount, ticket_type, status, resolver, created_at
                    FROM tickets
                    WHERE author = $1
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(author.0)
                .fetch_all(&self.pool)
                .await
            }
            TicketFilter::Status(status) => {
                sqlx::query(
                    r#"
                    SELECT id, author, description, amount, ticket_type, status, resolver, created_at
                    FROM tickets
                    WHERE status = $1
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| TicketError::StorageFailure(e.to_string()))?;

        Self::rows_to_tickets(rows)
    }

    async fn update(
        &self,
        id: &TicketId,
        command: &UpdateTicketCommand,
    ) -> Result<Option<Ticket>, TicketError> {
        let row = sqlx::query(
            r#"
            UPDATE tickets
            SET author = COALESCE($2, author),
                description = COALESCE($3, description),
                amount = COALESCE($4, amount),
                ticket_type = COALESCE($5, ticket_type),
                status = COALESCE($6, status),
                resolver = COALESCE($7, resolver)
            WHERE id = $1
            RETURNING id, author, description, amount, ticket_type, status, resolver, created_at
            "#,
        )
        .bind(id.0)
        .bind(command.author.map(|a| a.0))
        .bind(command.description.as_deref())
        .bind(command.amount)
        .bind(command.ticket_type.as_deref())
        .bind(command.status.as_ref().map(|s| s.as_str()))
        .bind(command.resolver.map(|r| r.0))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TicketError::StorageFailure(e.to_string()))?;

        row.as_ref().map(Self::row_to_ticket).transpose()
    }

    async fn delete_by_id(&self, id: &TicketId) -> Result<Option<TicketId>, TicketError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tickets
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| TicketError::StorageFailure(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(*id))
    }
}
