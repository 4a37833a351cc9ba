//! Product repository trait

use async_trait::async_trait;
use std::fmt::Debug;
use uuid::Uuid;

use super::entity::Product;
use crate::domain::DomainError;

/// Repository trait for product storage
#[async_trait]
pub trait ProductRepository: Send + Sync + Debug {
    /// Get a product by its public UUID
    async fn get(&self, id: Uuid) -> Result<Option<Product>, DomainError>;

    /// Get a product by its SKU
    async fn get_by_sku(&self, sku: &str) -> Result<Option<Product>, DomainError>;

    /// Create a new product
    async fn create(&self, product: Product) -> Result<Product, DomainError>;

    /// Update an existing product
    async fn update(&self, product: &Product) -> Result<Product, DomainError>;

    /// Delete a product
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// List products ordered by creation time
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>, DomainError>;

    /// Count all products
    async fn count(&self) -> Result<i64, DomainError>;

    /// Check if a SKU exists
    async fn sku_exists(&self, sku: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_sku(sku).await?.is_some())
    }
}
