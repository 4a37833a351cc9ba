//! Migrate command - applies or reverts database migrations

use clap::{Args, Subcommand};
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::{db, logging};

#[derive(Args)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

#[derive(Subcommand)]
pub enum MigrateAction {
    /// Apply all pending migrations
    Run,
    /// Roll back the most recently applied migration
    Revert,
}

/// Run the migrate command
pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });

    let pool = db::connect(&config.database).await?;

    match args.action {
        MigrateAction::Run => {
            db::run_migrations(&pool).await?;
        }
        MigrateAction::Revert => {
            db::revert_last_migration(&pool).await?;
        }
    }

    info!("Migration command finished");

    Ok(())
}
