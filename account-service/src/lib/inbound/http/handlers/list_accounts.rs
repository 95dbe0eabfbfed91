use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::Role;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedSession;
use crate::inbound::http::router::AppState;

/// List every account. Admin sessions only.
pub async fn list_accounts(
    State(state): State<AppState>,
    Extension(session): Extension<AuthenticatedSession>,
) -> Result<ApiSuccess<Vec<AccountData>>, ApiError> {
    let username = Username::new(session.username.clone())
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;
    let caller = state.account_service.get_account(&username).await?;
    if caller.role != Role::Admin {
        tracing::warn!(username = %caller.username, role = %caller.role, "Account listing denied");
        return Err(AccountError::Forbidden.into());
    }

    let accounts = state.account_service.list_accounts().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        accounts.iter().map(AccountData::from).collect(),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.as_str().to_string(),
            role: account.role,
            created_at: account.created_at,
        }
    }
}
