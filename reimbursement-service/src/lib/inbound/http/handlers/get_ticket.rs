use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::TicketResponseData;
use crate::domain::ticket::errors::TicketError;
use crate::domain::ticket::models::TicketId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_ticket(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(ticket_id): Path<String>,
) -> Result<ApiSuccess<TicketResponseData>, ApiError> {
    let ticket_id = TicketId::from_string(&ticket_id).map_err(TicketError::from)?;

    let ticket = state.ticket_service.get_ticket(&ticket_id).await?;

    state
        .access_policy
        .authorize_ticket_read(&caller.user_id, &ticket)
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, (&ticket).into()))
}
