//! In-memory product repository for tests and local development

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::product::{Product, ProductRepository};
use crate::domain::DomainError;

/// In-memory implementation of ProductRepository
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn get_by_sku(&self, sku: &str) -> Result<Option<Product>, DomainError> {
        let products = self.products.read().await;
        Ok(products.values().find(|p| p.sku() == sku).cloned())
    }

    async fn create(&self, product: Product) -> Result<Product, DomainError> {
        let mut products = self.products.write().await;

        if products.contains_key(&product.id()) {
            return Err(DomainError::conflict(format!(
                "Product '{}' already exists",
                product.id()
            )));
        }

        if products.values().any(|p| p.sku() == product.sku()) {
            return Err(DomainError::conflict(format!(
                "SKU '{}' already exists",
                product.sku()
            )));
        }

        products.insert(product.id(), product.clone());
        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<Product, DomainError> {
        let mut products = self.products.write().await;

        if !products.contains_key(&product.id()) {
            return Err(DomainError::not_found(format!(
                "Product '{}' not found",
                product.id()
            )));
        }

        products.insert(product.id(), product.clone());
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut products = self.products.write().await;
        Ok(products.remove(&id).is_some())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().await;

        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by_key(|p| (p.created_at(), p.id()));

        Ok(all
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let products = self.products.read().await;
        Ok(products.len() as i64)
    }
}
