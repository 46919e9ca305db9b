use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequest;
use crate::domain::identity::models::Identity;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::models::Username;

const INVALID_CREDENTIALS: &str = "Invalid Credentials.";
const LOGIN_FAILED: &str = "Internal server error during login.";

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;
    let (username, password) = body.require_both()?;

    // A name that could never have been registered cannot match anyone.
    let username = Username::new(username)
        .map_err(|_| ApiError::BadRequest(INVALID_CREDENTIALS.to_string()))?;

    let user = state
        .user_service
        .login(&username, &password)
        .await
        .map_err(|e| match e {
            UserError::InvalidCredentials => ApiError::BadRequest(INVALID_CREDENTIALS.to_string()),
            other => {
                tracing::error!(error = %other, "Login failed");
                ApiError::InternalServerError(LOGIN_FAILED.to_string())
            }
        })?;

    let token = state
        .token_service
        .issue(&Identity::from(&user))
        .map_err(|e| {
            tracing::error!(user_id = %user.id, error = %e, "Token issuance failed");
            ApiError::InternalServerError(LOGIN_FAILED.to_string())
        })?;

    Ok(ApiSuccess::new(
        StatusCode::ACCEPTED,
        LoginResponseData {
            role: user.role.to_string(),
            token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub role: String,
    pub token: String,
}
