//! Database pool construction and embedded migrations

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::DomainError;

/// Embedded migrations from the `migrations/` directory
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Connect a pool using the configured URL or component settings
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let url = config.connection_url();

    info!(
        host = %config.host,
        database = %config.dbname,
        "Connecting to PostgreSQL"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

    info!("PostgreSQL connection established");

    Ok(pool)
}

/// Apply all pending migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    info!("Applying database migrations");

    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DomainError::storage(format!("Migration failed: {}", e)))?;

    info!("Database migrations up to date");

    Ok(())
}

/// Roll back the most recently applied migration
pub async fn revert_last_migration(pool: &PgPool) -> Result<(), DomainError> {
    let applied: Vec<i64> =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations ORDER BY version")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to read migration history: {}", e))
            })?;

    let Some(last) = applied.last() else {
        info!("No applied migrations to revert");
        return Ok(());
    };

    // undo() reverts every migration newer than the target version
    let target = applied.iter().rev().nth(1).copied().unwrap_or(0);

    info!(version = last, "Reverting last database migration");

    MIGRATOR
        .undo(pool, target)
        .await
        .map_err(|e| DomainError::storage(format!("Migration revert failed: {}", e)))?;

    Ok(())
}

/// Check database reachability with a trivial query
pub async fn ping(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| DomainError::storage(format!("Database is not available: {}", e)))?;

    Ok(())
}
