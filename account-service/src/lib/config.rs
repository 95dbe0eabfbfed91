use std::env;
use std::path::PathBuf;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::lockout::models::LockoutPolicy;

/// Longest lock a single failure streak can impose (30 days)
const MAX_LOCKOUT_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Longest session lifetime (one year)
const MAX_SESSION_TTL_HOURS: i64 = 365 * 24;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub lockout: LockoutConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub legacy: Option<LegacyConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LockoutConfig {
    pub max_failed_attempts: u32,
    pub duration_seconds: i64,
}

impl LockoutConfig {
    pub fn policy(&self) -> LockoutPolicy {
        LockoutPolicy::new(
            self.max_failed_attempts,
            Duration::seconds(self.duration_seconds),
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub ttl_hours: i64,
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::hours(self.ttl_hours)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LegacyConfig {
    /// `username,password_hash` file imported at startup
    pub users_file: PathBuf,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (ACCOUNT__DATABASE__URL, ACCOUNT__SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.url", "sqlite://accounts.db")?
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 8080)?
            .set_default("lockout.max_failed_attempts", 3)?
            .set_default("lockout.duration_seconds", 300)?
            .set_default("session.ttl_hours", 24)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: ACCOUNT__DATABASE__URL=sqlite://... overrides database.url
            .add_source(
                Environment::with_prefix("ACCOUNT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values that would make lockout or session arithmetic meaningless.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.lockout.max_failed_attempts == 0 {
            return Err(ConfigError::Message(
                "lockout.max_failed_attempts must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_LOCKOUT_SECONDS).contains(&self.lockout.duration_seconds) {
            return Err(ConfigError::Message(format!(
                "lockout.duration_seconds must be between 1 and {MAX_LOCKOUT_SECONDS}"
            )));
        }
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&self.session.ttl_hours) {
            return Err(ConfigError::Message(format!(
                "session.ttl_hours must be between 1 and {MAX_SESSION_TTL_HOURS}"
            )));
        }
        Ok(())
    }
}
