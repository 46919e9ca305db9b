use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TicketResponseData;
use crate::domain::ticket::errors::TicketError;
use crate::domain::ticket::models::TicketId;
use crate::domain::ticket::models::TicketStatus;
use crate::domain::ticket::models::UpdateTicketCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_ticket(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(ticket_id): Path<String>,
    body: Result<Json<UpdateTicketRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TicketResponseData>, ApiError> {
    state
        .access_policy
        .authorize_ticket_update(&caller.user_id)
        .await?;

    let ticket_id = TicketId::from_string(&ticket_id).map_err(TicketError::from)?;
    let command = match body {
        Ok(Json(body)) => body.try_into_command()?,
        // No JSON body at all: only the resolver is recorded.
        Err(JsonRejection::MissingJsonContentType(_)) => UpdateTicketCommand::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    state
        .ticket_service
        .update_ticket(&ticket_id, command, &caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref ticket| ApiSuccess::new(StatusCode::ACCEPTED, ticket.into()))
}

/// Fields a resolver may overwrite. `id` and `resolver` are not accepted
/// from the client: unknown keys are dropped and the resolver is always the
/// caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateTicketRequestBody {
    author: Option<String>,
    description: Option<String>,
    amount: Option<f64>,
    #[serde(rename = "type")]
    ticket_type: Option<String>,
    status: Option<String>,
}

impl UpdateTicketRequestBody {
    fn try_into_command(self) -> Result<UpdateTicketCommand, ApiError> {
        let author = self
            .author
            .map(|a| UserId::from_string(&a))
            .transpose()
            .map_err(|_| ApiError::BadRequest("Invalid author id.".to_string()))?;

        Ok(UpdateTicketCommand {
            author,
            description: self.description,
            amount: self.amount,
            ticket_type: self.ticket_type,
            status: self.status.map(TicketStatus::from),
            resolver: None,
        })
    }
}
