//! CLI module for the CRUD API starter
//!
//! Provides subcommands for running the service:
//! - `serve`: run the HTTP API server (default mode)
//! - `migrate`: apply or revert database migrations

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// CRUD API Starter - REST service template with OAuth2/JWT authentication
#[derive(Parser)]
#[command(name = "crud-api-starter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Manage database migrations
    Migrate(migrate::MigrateArgs),
}
