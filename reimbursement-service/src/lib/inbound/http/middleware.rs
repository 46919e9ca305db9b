use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::identity::models::Identity;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Header in which the client repeats the id it claims to be acting as.
pub const CURRENT_USER_HEADER: &str = "current-user";

/// Verified caller, stored in request extensions by the gate.
///
/// `role` is the snapshot from the token. Authorization decisions look the
/// role up again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}

impl From<Identity> for AuthenticatedUser {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            username: identity.username,
            role: identity.role,
        }
    }
}

/// Gate for ticket routes: a valid bearer token whose subject matches the
/// `current-user` header exactly.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let identity = verify_bearer(&state, &req)?;

    let claimed = req
        .headers()
        .get(CURRENT_USER_HEADER)
        .and_then(|value| value.to_str().ok());

    if claimed != Some(identity.user_id.to_string().as_str()) {
        tracing::warn!(
            user_id = %identity.user_id,
            claimed = ?claimed,
            "Token subject does not match claimed user"
        );
        return Err(ApiError::Forbidden("Forbidden access".to_string()).into_response());
    }

    req.extensions_mut()
        .insert(AuthenticatedUser::from(identity));

    Ok(next.run(req).await)
}

/// Gate that only requires a valid bearer token.
pub async fn authenticate_bearer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let identity = verify_bearer(&state, &req)?;

    req.extensions_mut()
        .insert(AuthenticatedUser::from(identity));

    Ok(next.run(req).await)
}

fn verify_bearer(state: &AppState, req: &Request) -> Result<Identity, Response> {
    let token = extract_token_from_header(req)?;

    state.token_service.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        ApiError::from(e).into_response()
    })
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()).into_response())
}
