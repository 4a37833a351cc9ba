//! JWKS fetching with an in-process TTL cache

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::auth::AuthError;
use crate::domain::DomainError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON Web Key Set as published by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    /// Find a key by its key ID
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid.as_deref() == Some(kid))
    }
}

/// A single JSON Web Key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type (RSA, EC, oct)
    pub kty: String,
    /// Key ID
    #[serde(default)]
    pub kid: Option<String>,
    /// Algorithm
    #[serde(default)]
    pub alg: Option<String>,
    /// Key use ("sig" for signing keys)
    #[serde(default, rename = "use")]
    pub key_use: Option<String>,
    /// RSA modulus (base64url)
    #[serde(default)]
    pub n: Option<String>,
    /// RSA public exponent (base64url)
    #[serde(default)]
    pub e: Option<String>,
}

/// Client for a provider's JWKS endpoint.
///
/// Fetched key sets are cached per URL with a TTL so every request does not
/// pay a network round trip. Concurrent first fetches may race, but they
/// insert identical key data.
#[derive(Debug, Clone)]
pub struct JwksClient {
    http: reqwest::Client,
    url: String,
    cache: Cache<String, Arc<JwkSet>>,
}

impl JwksClient {
    /// Create a client for the given JWKS URL with the given cache TTL
    pub fn new(url: impl Into<String>, cache_ttl: Duration) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            url: url.into(),
            cache: Cache::builder().time_to_live(cache_ttl).max_capacity(8).build(),
        })
    }

    /// The JWKS endpoint URL this client reads from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the key set, serving from cache when possible
    pub async fn get(&self) -> Result<Arc<JwkSet>, AuthError> {
        if let Some(cached) = self.cache.get(&self.url).await {
            debug!(url = %self.url, "Using cached JWKS");
            return Ok(cached);
        }

        self.refresh().await
    }

    /// Fetch the key set from the provider and replace the cached copy
    pub async fn refresh(&self) -> Result<Arc<JwkSet>, AuthError> {
        debug!(url = %self.url, "Fetching JWKS");

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AuthError::JwksFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::JwksFetch(format!(
                "JWKS endpoint returned {}",
                response.status()
            )));
        }

        let jwks: JwkSet = response
            .json()
            .await
            .map_err(|e| AuthError::JwksFetch(format!("Invalid JWKS document: {}", e)))?;

        if jwks.keys.is_empty() {
            return Err(AuthError::JwksFetch("JWKS contains no keys".to_string()));
        }

        debug!(url = %self.url, key_count = jwks.keys.len(), "Fetched JWKS");

        let jwks = Arc::new(jwks);
        self.cache.insert(self.url.clone(), jwks.clone()).await;

        Ok(jwks)
    }
}
