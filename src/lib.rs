//! CRUD API Starter
//!
//! A REST service template with:
//! - OAuth2/JWT authentication against an external identity provider
//! - Permission-gated CRUD endpoints for example entities
//! - sqlx-backed PostgreSQL persistence with embedded migrations

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use tracing::info;

use api::state::AppState;
use domain::DomainError;
use infrastructure::auth::{JwksClient, TokenVerifier};
use infrastructure::db;
use infrastructure::product::{PostgresProductRepository, ProductService};
use infrastructure::user::{PostgresUserRepository, UserService};

/// Create the application state with configuration loaded from the environment
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::load().unwrap_or_default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = db::connect(&config.database).await?;
    db::run_migrations(&pool).await?;

    let user_service = Arc::new(UserService::new(Arc::new(PostgresUserRepository::new(
        pool.clone(),
    ))));
    let product_service = Arc::new(ProductService::new(Arc::new(
        PostgresProductRepository::new(pool.clone()),
    )));

    let token_verifier = Arc::new(create_token_verifier(config)?);

    Ok(AppState::new(
        user_service,
        product_service,
        token_verifier,
        Some(pool),
    ))
}

/// Build the token verifier from the auth configuration
pub fn create_token_verifier(config: &AppConfig) -> Result<TokenVerifier, DomainError> {
    let auth = &config.auth;

    if auth.jwks_url.is_empty() {
        return Err(DomainError::configuration(
            "auth.jwks_url is required (e.g. https://your-tenant.auth0.com/.well-known/jwks.json)",
        ));
    }

    if auth.issuer.is_empty() {
        return Err(DomainError::configuration(
            "auth.issuer is required (e.g. https://your-tenant.auth0.com/)",
        ));
    }

    let algorithm = Algorithm::from_str(&auth.algorithm).map_err(|_| {
        DomainError::configuration(format!("Unknown signing algorithm: {}", auth.algorithm))
    })?;

    let jwks = JwksClient::new(
        &auth.jwks_url,
        Duration::from_secs(auth.jwks_cache_ttl_secs),
    )?;

    info!(
        issuer = %auth.issuer,
        algorithm = %auth.algorithm,
        "Token verification configured"
    );

    Ok(TokenVerifier::new(
        jwks,
        &auth.issuer,
        auth.audience.clone(),
        algorithm,
    ))
}
