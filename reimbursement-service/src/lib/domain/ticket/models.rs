use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::ticket::errors::TicketIdError;
use crate::domain::ticket::errors::TicketInputError;
use crate::domain::user::models::UserId;

/// A reimbursement request.
///
/// `id`, `author` and `created_at` are fixed when the ticket is submitted.
/// Everything else can be rewritten by a manager through an update.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: TicketId,
    pub author: UserId,
    pub description: String,
    pub amount: f64,
    pub ticket_type: Option<String>,
    pub status: TicketStatus,
    pub resolver: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Ticket unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub Uuid);

impl TicketId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a ticket ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TicketIdError> {
        Uuid::parse_str(s)
            .map(TicketId)
            .map_err(|e| TicketIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Approval state of a ticket.
///
/// Resolvers may set any status string; the well-known ones get variants.
/// Nothing stops a resolved ticket from being moved again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TicketStatus {
    #[default]
    Pending,
    Approved,
    Denied,
    Other(String),
}

impl TicketStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TicketStatus::Pending => "Pending",
            TicketStatus::Approved => "Approved",
            TicketStatus::Denied => "Denied",
            TicketStatus::Other(status) => status,
        }
    }
}

impl From<String> for TicketStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "Pending" => TicketStatus::Pending,
            "Approved" => TicketStatus::Approved,
            "Denied" => TicketStatus::Denied,
            _ => TicketStatus::Other(status),
        }
    }
}

impl From<&str> for TicketStatus {
    fn from(status: &str) -> Self {
        TicketStatus::from(status.to_string())
    }
}

impl From<TicketStatus> for String {
    fn from(status: TicketStatus) -> Self {
        match status {
            TicketStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated ticket submission.
///
/// The author is not part of the command: it always comes from the
/// authenticated caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTicketCommand {
    pub description: String,
    pub amount: f64,
    pub ticket_type: Option<String>,
    pub status: Option<TicketStatus>,
}

impl CreateTicketCommand {
    /// Validate raw submission fields.
    ///
    /// Amount is checked before description.
    ///
    /// # Errors
    /// * `MissingAmount` - Amount absent or zero
    /// * `NonPositiveAmount` - Amount negative or not finite
    /// * `MissingDescription` - Description absent or empty
    pub fn new(
        description: Option<String>,
        amount: Option<f64>,
        ticket_type: Option<String>,
        status: Option<TicketStatus>,
    ) -> Result<Self, TicketInputError> {
        let amount = match amount {
            None => return Err(TicketInputError::MissingAmount),
            Some(amount) if amount == 0.0 => return Err(TicketInputError::MissingAmount),
            Some(amount) if !amount.is_finite() || amount < 0.0 => {
                return Err(TicketInputError::NonPositiveAmount(amount))
            }
            Some(amount) => amount,
        };

        let description = description
            .filter(|d| !d.is_empty())
            .ok_or(TicketInputError::MissingDescription)?;

        Ok(Self {
            description,
            amount,
            ticket_type,
            status,
        })
    }
}

/// Partial overwrite of a stored ticket.
///
/// Fields are applied as given, without validation: an update may rewrite
/// `author` or `amount` just as freely as `status`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTicketCommand {
    pub author: Option<UserId>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub ticket_type: Option<String>,
    pub status: Option<TicketStatus>,
    pub resolver: Option<UserId>,
}

impl UpdateTicketCommand {
    /// Stamp the command with the user performing the update.
    pub fn with_resolver(mut self, resolver: UserId) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn apply(&self, ticket: &mut Ticket) {
        if let Some(author) = self.author {
            ticket.author = author;
        }
        if let Some(description) = &self.description {
            ticket.description = description.clone();
        }
        if let Some(amount) = self.amount {
            ticket.amount = amount;
        }
        if let Some(ticket_type) = &self.ticket_type {
            ticket.ticket_type = Some(ticket_type.clone());
        }
        if let Some(status) = &self.status {
            ticket.status = status.clone();
        }
        if let Some(resolver) = self.resolver {
            ticket.resolver = Some(resolver);
        }
    }
}

/// Field-equality scan over stored tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketFilter {
    Author(UserId),
    Status(TicketStatus),
}

impl TicketFilter {
    pub fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            TicketFilter::Author(author) => ticket.author == *author,
            TicketFilter::Status(status) => ticket.status == *status,
        }
    }
}
