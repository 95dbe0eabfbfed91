use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::PasswordPolicyError;
use crate::account::errors::RoleError;
use crate::account::errors::UsernameError;
use crate::domain::account::models::Account;
use crate::domain::account::models::Password;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Role;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
    #[serde(default)]
    confirm_password: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let username = Username::new(self.username)?;
        if let Some(confirm_password) = &self.confirm_password {
            if *confirm_password != self.password {
                return Err(ParseRegisterRequestError::PasswordMismatch);
            }
        }
        let password = Password::new(self.password)?;
        let role = match self.role {
            Some(role) => role.parse::<Role>()?,
            None => Role::default(),
        };
        Ok(RegisterCommand::new(username, password, role))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub message: String,
}

impl From<&Account> for RegisterResponseData {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.as_str().to_string(),
            role: account.role,
            created_at: account.created_at,
            message: format!("User '{}' registered successfully.", account.username),
        }
    }
}
