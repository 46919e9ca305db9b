use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TicketResponseData;
use crate::domain::ticket::models::CreateTicketCommand;
use crate::domain::ticket::models::TicketStatus;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_ticket(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    body: Result<Json<CreateTicketRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TicketResponseData>, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command()?;

    state
        .ticket_service
        .create_ticket(command, &caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref ticket| ApiSuccess::new(StatusCode::CREATED, ticket.into()))
}

/// Submission body. Any `author` the client sends is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateTicketRequestBody {
    amount: Option<f64>,
    description: Option<String>,
    #[serde(rename = "type")]
    ticket_type: Option<String>,
    status: Option<String>,
}

impl CreateTicketRequestBody {
    fn try_into_command(self) -> Result<CreateTicketCommand, ApiError> {
        CreateTicketCommand::new(
            self.description,
            self.amount,
            self.ticket_type,
            self.status.map(TicketStatus::from),
        )
        .map_err(ApiError::from)
    }
}
