use std::str::FromStr;
use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::ports::AccountServicePort;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::legacy::read_users_file;
use account_service::outbound::repositories::SqliteAccountRepository;
use account_service::outbound::repositories::SqliteLockoutRepository;
use account_service::outbound::repositories::SqliteSessionRepository;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        max_failed_attempts = config.lockout.max_failed_attempts,
        lockout_seconds = config.lockout.duration_seconds,
        session_ttl_hours = config.session.ttl_hours,
        "Configuration loaded"
    );

    let connect_options =
        SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let sqlite_pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(connect_options)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "sqlite",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&sqlite_pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let account_repository = Arc::new(SqliteAccountRepository::new(sqlite_pool.clone()));
    let lockout_repository = Arc::new(SqliteLockoutRepository::new(sqlite_pool.clone()));
    let session_repository = Arc::new(SqliteSessionRepository::new(sqlite_pool));

    let account_service = Arc::new(
        AccountService::new(account_repository, lockout_repository, session_repository)
            .with_lockout_policy(config.lockout.policy())
            .with_session_ttl(config.session.ttl()),
    );

    if let Some(legacy) = &config.legacy {
        let credentials = read_users_file(&legacy.users_file).await?;
        let found = credentials.len();
        let imported = account_service.import_credentials(credentials).await?;
        tracing::info!(
            path = %legacy.users_file.display(),
            found,
            imported,
            "Legacy users imported"
        );
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service);
    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
