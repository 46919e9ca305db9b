use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequest;
use super::CREDENTIALS_REQUIRED;
use crate::domain::user::models::RegisterUserCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::errors::UsernameError;
use crate::user::models::Username;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<ApiSuccess<&'static str>, ApiError> {
    let Json(body) = body?;
    let (username, password) = body.require_both()?;

    let username = Username::new(username).map_err(|e| match e {
        UsernameError::Empty => ApiError::BadRequest(CREDENTIALS_REQUIRED.to_string()),
        other => ApiError::BadRequest(other.to_string()),
    })?;

    state
        .user_service
        .register(RegisterUserCommand::new(username, password))
        .await
        .map_err(|e| match e {
            UserError::UsernameAlreadyExists(_) => {
                ApiError::BadRequest("Username is already taken.".to_string())
            }
            other => {
                tracing::error!(error = %other, "Registration failed");
                ApiError::InternalServerError(
                    "Internal server error during registration.".to_string(),
                )
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        "Registration successful.",
    ))
}
