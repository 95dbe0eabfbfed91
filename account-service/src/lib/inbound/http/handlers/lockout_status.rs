use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn lockout_status(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<LockoutStatusResponseData>, ApiError> {
    let status = state.account_service.check_locked(&username).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LockoutStatusResponseData {
            username,
            locked: status.is_locked(),
            remaining_seconds: status.remaining_seconds(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockoutStatusResponseData {
    pub username: String,
    pub locked: bool,
    pub remaining_seconds: i64,
}
