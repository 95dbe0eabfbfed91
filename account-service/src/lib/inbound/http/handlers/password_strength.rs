use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use crate::domain::account::models::PasswordStrength;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Advisory strength meter. Never fails and never stores anything.
pub async fn password_strength(
    State(state): State<AppState>,
    Json(body): Json<PasswordStrengthRequestBody>,
) -> ApiSuccess<PasswordStrengthResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        PasswordStrengthResponseData {
            strength: state.account_service.check_password_strength(&body.password),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PasswordStrengthRequestBody {
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordStrengthResponseData {
    pub strength: PasswordStrength,
}
