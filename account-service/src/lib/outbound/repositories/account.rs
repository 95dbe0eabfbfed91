use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::SqlitePool;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::Role;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

pub struct SqliteAccountRepository {
    pool: SqlitePool,
}

impl SqliteAccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    username: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        // Stored rows were validated on insert; a failure here is corrupt storage.
        let corrupt = |e: &dyn std::fmt::Display| {
            AccountError::DatabaseError(format!("invalid stored account '{}': {}", row.username, e))
        };
        let username = Username::new(row.username.clone()).map_err(|e| corrupt(&e))?;
        let role = row.role.parse::<Role>().map_err(|e| corrupt(&e))?;

        Ok(Account {
            username,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AccountRepository for SqliteAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (username, password_hash, role, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(account.username.as_str())
        .bind(account.password_hash.as_str())
        .bind(account.role.as_str())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountError::DuplicateUsername(account.username.as_str().to_string());
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(account)
    }

    async fn create_if_absent(&self, account: Account) -> Result<bool, AccountError> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (username, password_hash, role, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(account.username.as_str())
        .bind(account.password_hash.as_str())
        .bind(account.role.as_str())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT username, password_hash, role, created_at
            FROM accounts
            WHERE username = ?1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT username, password_hash, role, created_at
            FROM accounts
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Account::try_from).collect()
    }
}
