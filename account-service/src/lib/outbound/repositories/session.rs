use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::SqlitePool;

use crate::account::errors::AccountError;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionRepository;

pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SessionRow {
    token: String,
    username: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            token: row.token,
            username: row.username,
            issued_at: row.issued_at,
            expires_at: row.expires_at,
        }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn create(&self, session: Session) -> Result<Session, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token, username, issued_at, expires_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(session.token.as_str())
        .bind(session.username.as_str())
        .bind(session.issued_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(session)
    }

    async fn find(&self, token: &str) -> Result<Option<Session>, AccountError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT token, username, issued_at, expires_at
            FROM sessions
            WHERE token = ?1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(row.map(Session::from))
    }

    async fn delete(&self, token: &str) -> Result<bool, AccountError> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE token = ?1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AccountError> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE expires_at <= ?1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
