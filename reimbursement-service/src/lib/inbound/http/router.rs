use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_ticket::create_ticket;
use super::handlers::get_ticket::get_ticket;
use super::handlers::list_tickets::list_tickets;
use super::handlers::login::login;
use super::handlers::profile::get_profile;
use super::handlers::register::register;
use super::handlers::update_ticket::update_ticket;
use super::middleware::authenticate;
use super::middleware::authenticate_bearer;
use crate::domain::access::ports::AccessPolicyPort;
use crate::domain::identity::tokens::TokenService;
use crate::domain::ticket::ports::TicketServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub ticket_service: Arc<dyn TicketServicePort>,
    pub access_policy: Arc<dyn AccessPolicyPort>,
    pub token_service: Arc<TokenService>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    ticket_service: Arc<dyn TicketServicePort>,
    access_policy: Arc<dyn AccessPolicyPort>,
    token_service: Arc<TokenService>,
) -> Router {
    let state = AppState {
        user_service,
        ticket_service,
        access_policy,
        token_service,
    };

    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    let profile_routes = Router::new()
        .route("/profile", get(get_profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate_bearer,
        ));

    let ticket_routes = Router::new()
        .route("/tickets", post(create_ticket).get(list_tickets))
        .route("/tickets/:ticket_id", get(get_ticket).put(update_ticket))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(profile_routes)
        .merge(ticket_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
