#![allow(dead_code)]

use std::sync::Arc;

use account_service::domain::account::service::AccountService;
use account_service::domain::lockout::models::LockoutPolicy;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::SqliteAccountService;
use account_service::outbound::repositories::SqliteAccountRepository;
use account_service::outbound::repositories::SqliteLockoutRepository;
use account_service::outbound::repositories::SqliteSessionRepository;
use chrono::DateTime;
use chrono::Utc;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqliteJournalMode;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Password satisfying every policy rule
pub const STRONG_PASSWORD: &str = "Abcdef1!";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: TestDb,
    pub api_client: reqwest::Client,
}

/// Test database helper backed by a private SQLite database
pub struct TestDb {
    pub pool: SqlitePool,
    // Keeps the on-disk database alive for the lifetime of the pool
    _dir: Option<TempDir>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let db = TestDb::new().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(Arc::new(db.service()));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            db,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register an account through the API, panicking on failure
    pub async fn register(&self, username: &str, role: &str) {
        let response = self
            .post("/api/accounts")
            .json(&serde_json::json!({
                "username": username,
                "password": STRONG_PASSWORD,
                "role": role,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Log in through the API and return the session token
    pub async fn login(&self, username: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&serde_json::json!({
                "username": username,
                "password": STRONG_PASSWORD,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}

impl TestDb {
    /// Create a fresh database with migrations applied
    pub async fn new() -> Self {
        // A single connection that never recycles keeps the in-memory database alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        Self::migrated(pool, None).await
    }

    /// Create a fresh file-backed database that serves several connections at once
    pub async fn on_disk(max_connections: u32) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let options = SqliteConnectOptions::new()
            .filename(dir.path().join("accounts.db"))
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(10));

        let pool = SqlitePoolOptions::new()
            .min_connections(max_connections)
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .expect("Failed to open on-disk database");

        Self::migrated(pool, Some(dir)).await
    }

    async fn migrated(pool: SqlitePool, dir: Option<TempDir>) -> Self {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool, _dir: dir }
    }

    pub fn accounts(&self) -> SqliteAccountRepository {
        SqliteAccountRepository::new(self.pool.clone())
    }

    pub fn lockouts(&self) -> SqliteLockoutRepository {
        SqliteLockoutRepository::new(self.pool.clone())
    }

    pub fn sessions(&self) -> SqliteSessionRepository {
        SqliteSessionRepository::new(self.pool.clone())
    }

    /// Account service with the default policy
    pub fn service(&self) -> SqliteAccountService {
        AccountService::new(
            Arc::new(self.accounts()),
            Arc::new(self.lockouts()),
            Arc::new(self.sessions()),
        )
    }

    /// Account service with a custom lockout policy
    pub fn service_with_policy(&self, policy: LockoutPolicy) -> SqliteAccountService {
        self.service().with_lockout_policy(policy)
    }

    /// Move the last failure of a username back in time to simulate waiting
    pub async fn backdate_last_failure(&self, username: &str, last_failure_at: DateTime<Utc>) {
        sqlx::query("UPDATE lockouts SET last_failure_at = ?1 WHERE username = ?2")
            .bind(last_failure_at)
            .bind(username)
            .execute(&self.pool)
            .await
            .expect("Failed to backdate lockout");
    }

    /// Move the expiry of a session back in time
    pub async fn expire_session(&self, token: &str) {
        sqlx::query("UPDATE sessions SET expires_at = ?1 WHERE token = ?2")
            .bind(Utc::now() - chrono::Duration::seconds(1))
            .bind(token)
            .execute(&self.pool)
            .await
            .expect("Failed to expire session");
    }

    pub async fn count_sessions(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count sessions")
    }
}
