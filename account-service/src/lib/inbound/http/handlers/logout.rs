use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedSession;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<AuthenticatedSession>,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    state.account_service.logout(&session.token).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData {
            message: format!("Goodbye, {}.", session.username),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
