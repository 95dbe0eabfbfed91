use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::SqlitePool;

use crate::account::errors::AccountError;
use crate::domain::lockout::models::LockoutRecord;
use crate::domain::lockout::ports::LockoutRepository;

pub struct SqliteLockoutRepository {
    pool: SqlitePool,
}

impl SqliteLockoutRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LockoutRow {
    username: String,
    failed_count: i64,
    last_failure_at: DateTime<Utc>,
}

impl From<LockoutRow> for LockoutRecord {
    fn from(row: LockoutRow) -> Self {
        LockoutRecord {
            username: row.username,
            failed_attempts: row.failed_count.clamp(0, i64::from(u32::MAX)) as u32,
            last_failure_at: row.last_failure_at,
        }
    }
}

#[async_trait]
impl LockoutRepository for SqliteLockoutRepository {
    async fn find(&self, username: &str) -> Result<Option<LockoutRecord>, AccountError> {
        let row = sqlx::query_as::<_, LockoutRow>(
            r#"
            SELECT username, failed_count, last_failure_at
            FROM lockouts
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(row.map(LockoutRecord::from))
    }

    async fn record_failure(
        &self,
        username: &str,
        at: DateTime<Utc>,
    ) -> Result<LockoutRecord, AccountError> {
        let row = sqlx::query_as::<_, LockoutRow>(
            r#"
            INSERT INTO lockouts (username, failed_count, last_failure_at)
            VALUES (?1, 1, ?2)
            ON CONFLICT (username) DO UPDATE SET
                failed_count = lockouts.failed_count + 1,
                last_failure_at = excluded.last_failure_at
            RETURNING username, failed_count, last_failure_at
            "#,
        )
        .bind(username)
        .bind(at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn reset(&self, username: &str) -> Result<(), AccountError> {
        sqlx::query(
            r#"
            UPDATE lockouts
            SET failed_count = 0, last_failure_at = ?2
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .bind(DateTime::<Utc>::default())
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
