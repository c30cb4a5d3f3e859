use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;

use super::UserSource;
use crate::config::DatabaseConfig;

const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const LIST_USERS_SQL: &str = "SELECT row_to_json(u) FROM users u";

/// Postgres-backed user source
#[derive(Clone)]
pub struct PostgresUsers {
    pool: PgPool,
}

impl PostgresUsers {
    /// Open the connection pool and verify the database is reachable
    pub async fn connect(config: &DatabaseConfig, password: &str) -> Result<Self> {
        Self::connect_with_timeout(config, password, DEFAULT_ACQUIRE_TIMEOUT).await
    }

    pub async fn connect_with_timeout(
        config: &DatabaseConfig,
        password: &str,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(password);

        tracing::info!(
            "Connecting to Postgres at {}:{}/{}",
            config.host,
            config.port,
            config.database
        );

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to Postgres at {}:{}", config.host, config.port))?;

        tracing::info!("Successfully connected to Postgres database: {}", config.database);
        Ok(Self { pool })
    }
}

#[async_trait]
impl UserSource for PostgresUsers {
    async fn list_users(&self) -> Result<Vec<JsonValue>> {
        let rows = sqlx::query_scalar::<_, JsonValue>(LIST_USERS_SQL)
            .fetch_all(&self.pool)
            .await
            .context("Failed to query users")?;

        tracing::debug!("Fetched {} user rows", rows.len());
        Ok(rows)
    }
}
