use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde_json::json;

use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the validated session in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub token: String,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Middleware that resolves bearer session tokens and adds the session to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let session = state
        .account_service
        .validate_session(token)
        .await
        .map_err(|e| {
            tracing::warn!("Session validation failed: {}", e);
            ApiError::from(e).into_response()
        })?;

    req.extensions_mut().insert(AuthenticatedSession {
        token: session.token,
        username: session.username,
        issued_at: session.issued_at,
        expires_at: session.expires_at,
    });

    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "status_code": StatusCode::UNAUTHORIZED.as_u16(),
            "data": { "message": message }
        })),
    )
        .into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Invalid Authorization header format. Expected: Bearer <token>"))
}
