use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TicketResponseData;
use crate::domain::ticket::models::TicketFilter;
use crate::domain::ticket::models::TicketStatus;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_tickets(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Query(query): Query<ListTicketsQuery>,
) -> Result<ApiSuccess<Vec<TicketResponseData>>, ApiError> {
    let filter = query.into_filter()?;

    let requested_author = match &filter {
        TicketFilter::Author(author) => Some(author),
        TicketFilter::Status(_) => None,
    };
    state
        .access_policy
        .authorize_ticket_view(&caller.user_id, requested_author)
        .await?;

    let tickets = match &filter {
        TicketFilter::Author(author) => state.ticket_service.list_by_author(author).await?,
        TicketFilter::Status(status) => state.ticket_service.list_by_status(status).await?,
    };

    Ok(ApiSuccess::new(
        StatusCode::OK,
        tickets.iter().map(TicketResponseData::from).collect(),
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListTicketsQuery {
    author: Option<String>,
    status: Option<String>,
}

impl ListTicketsQuery {
    /// `author` wins when both are given. Empty values count as absent.
    fn into_filter(self) -> Result<TicketFilter, ApiError> {
        let author = self.author.filter(|a| !a.is_empty());
        let status = self.status.filter(|s| !s.is_empty());

        match (author, status) {
            (Some(author), _) => UserId::from_string(&author)
                .map(TicketFilter::Author)
                .map_err(|_| ApiError::InvalidQuery("Invalid author id.".to_string())),
            (None, Some(status)) => Ok(TicketFilter::Status(TicketStatus::from(status))),
            (None, None) => Err(ApiError::InvalidQuery(
                "Please provide either 'status' or 'author' query parameter".to_string(),
            )),
        }
    }
}
