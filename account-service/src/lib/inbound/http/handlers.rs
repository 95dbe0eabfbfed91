use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;

pub mod current_session;
pub mod list_accounts;
pub mod lockout_status;
pub mod login;
pub mod logout;
pub mod password_strength;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
    Locked(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Locked(msg) => (StatusCode::LOCKED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidUsername(_)
            | AccountError::InvalidPassword(_)
            | AccountError::InvalidRole(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::DuplicateUsername(_) => ApiError::Conflict(err.to_string()),
            AccountError::NotFound(_)
            | AccountError::WrongPassword
            | AccountError::InvalidSession => ApiError::Unauthorized(err.to_string()),
            AccountError::AccountLocked { .. } => ApiError::Locked(err.to_string()),
            AccountError::Forbidden => ApiError::Forbidden(err.to_string()),
            AccountError::PasswordHashing(_)
            | AccountError::TokenGeneration(_)
            | AccountError::DatabaseError(_) => {
                tracing::error!(error = %err, "Account operation failed");
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::errors::UsernameError;

    #[test]
    fn test_account_error_status_mapping() {
        assert!(matches!(
            ApiError::from(AccountError::InvalidUsername(
                UsernameError::InvalidCharacters
            )),
            ApiError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            ApiError::from(AccountError::DuplicateUsername("alice".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(AccountError::WrongPassword),
            ApiError::Unauthorized(_)
        ));
        assert_eq!(
            ApiError::from(AccountError::AccountLocked {
                remaining_seconds: 42
            }),
            ApiError::Locked("Account locked. Try again in 42 seconds".to_string())
        );
        assert!(matches!(
            ApiError::from(AccountError::DatabaseError("gone".to_string())),
            ApiError::InternalServerError(_)
        ));
    }
}
