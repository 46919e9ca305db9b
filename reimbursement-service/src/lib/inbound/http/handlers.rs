use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;

use crate::domain::access::errors::AccessError;
use crate::domain::identity::errors::TokenError;
use crate::domain::ticket::errors::TicketError;
use crate::domain::ticket::errors::TicketInputError;
use crate::domain::ticket::models::Ticket;
use crate::user::errors::UserError;

pub mod create_ticket;
pub mod get_ticket;
pub mod list_tickets;
pub mod login;
pub mod profile;
pub mod register;
pub mod update_ticket;

pub const CREDENTIALS_REQUIRED: &str = "Username and password are required.";
pub const TICKET_NOT_FOUND: &str = "Ticket not found.";
pub const INVALID_BODY: &str = "Request body must be valid JSON with correctly typed fields.";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// HTTP-facing failure.
///
/// Body validation and credential errors render as a bare JSON string; gate,
/// policy, query and lookup failures render as `{"message": ...}`. Messages
/// are fixed text, never internal error details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    InvalidQuery(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    InternalServerError(String),
    /// 500 with a `{"message": ...}` body.
    InternalServerErrorMessage(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(json!(msg))),
            ApiError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!(msg)))
            }
            ApiError::InvalidQuery(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": msg })))
            }
            ApiError::InternalServerErrorMessage(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": msg })),
            ),
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "message": msg })))
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, Json(json!({ "message": msg }))),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, Json(json!({ "message": msg }))),
        }
        .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "Request body rejected");
        ApiError::BadRequest(INVALID_BODY.to_string())
    }
}

impl From<TicketInputError> for ApiError {
    fn from(err: TicketInputError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<TicketError> for ApiError {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::InvalidInput(input) => ApiError::from(input),
            TicketError::InvalidTicketId(_) | TicketError::NotFound(_) => {
                ApiError::NotFound(TICKET_NOT_FOUND.to_string())
            }
            TicketError::StorageFailure(_) => {
                ApiError::InternalServerError("Ticket operation failed.".to_string())
            }
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError::Forbidden(err.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(_: TokenError) -> Self {
        ApiError::Forbidden("Invalid or expired token".to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => {
                ApiError::NotFound("User not found".to_string())
            }
            other => {
                tracing::error!(error = %other, "User operation failed");
                ApiError::InternalServerErrorMessage("Internal server error".to_string())
            }
        }
    }
}

/// Body shared by registration and login. Missing fields are reported by the
/// handlers with a fixed message rather than a deserialization error.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Both fields present and non-empty, or `CREDENTIALS_REQUIRED`.
    pub fn require_both(self) -> Result<(String, String), ApiError> {
        match (self.username, self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok((username, password))
            }
            _ => Err(ApiError::BadRequest(CREDENTIALS_REQUIRED.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketResponseData {
    pub id: String,
    pub author: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Ticket> for TicketResponseData {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id.to_string(),
            author: ticket.author.to_string(),
            description: ticket.description.clone(),
            amount: ticket.amount,
            ticket_type: ticket.ticket_type.clone(),
            status: ticket.status.to_string(),
            resolver: ticket.resolver.map(|r| r.to_string()),
            created_at: ticket.created_at,
        }
    }
}
