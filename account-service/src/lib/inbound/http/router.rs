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

use super::handlers::current_session::current_session;
use super::handlers::list_accounts::list_accounts;
use super::handlers::lockout_status::lockout_status;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::password_strength::password_strength;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::service::AccountService;
use crate::outbound::repositories::SqliteAccountRepository;
use crate::outbound::repositories::SqliteLockoutRepository;
use crate::outbound::repositories::SqliteSessionRepository;

/// Account service wired to the SQLite adapters.
pub type SqliteAccountService =
    AccountService<SqliteAccountRepository, SqliteLockoutRepository, SqliteSessionRepository>;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<SqliteAccountService>,
}

pub fn create_router(account_service: Arc<SqliteAccountService>) -> Router {
    let state = AppState { account_service };

    let public_routes = Router::new()
        .route("/api/accounts", post(register))
        .route("/api/accounts/:username/lockout", get(lockout_status))
        .route("/api/auth/login", post(login))
        .route("/api/password-strength", post(password_strength));

    let protected_routes = Router::new()
        .route("/api/auth/session", get(current_session))
        .route("/api/auth/logout", post(logout))
        .route("/api/admin/accounts", get(list_accounts))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

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
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
