use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::Role;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedSession;
use crate::inbound::http::router::AppState;

/// Describe the session behind the bearer token.
pub async fn current_session(
    State(state): State<AppState>,
    Extension(session): Extension<AuthenticatedSession>,
) -> Result<ApiSuccess<CurrentSessionResponseData>, ApiError> {
    let username = Username::new(session.username.clone())
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;
    let account = state.account_service.get_account(&username).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        CurrentSessionResponseData {
            username: session.username,
            role: account.role,
            issued_at: session.issued_at,
            expires_at: session.expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentSessionResponseData {
    pub username: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
