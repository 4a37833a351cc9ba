//! Product service for CRUD operations

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::product::{
    validate_description, validate_name, validate_price_cents, validate_sku, Product,
    ProductRepository,
};
use crate::domain::DomainError;

/// Request for creating a new product
#[derive(Debug, Clone)]
pub struct CreateProductRequest {
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub price_cents: i64,
}

/// Request for partially updating a product; absent fields are left
/// unchanged. The SKU is immutable once assigned.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub is_active: Option<bool>,
}

const MAX_PAGE_SIZE: i64 = 100;
const DEFAULT_PAGE_SIZE: i64 = 50;

/// Product service wrapping a repository with validation and uniqueness rules
#[derive(Debug)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new product
    pub async fn create(&self, request: CreateProductRequest) -> Result<Product, DomainError> {
        validate_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_sku(&request.sku).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_price_cents(request.price_cents)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(description) = &request.description {
            validate_description(description)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if self.repository.sku_exists(&request.sku).await? {
            return Err(DomainError::conflict(format!(
                "SKU '{}' already exists",
                request.sku
            )));
        }

        let product = Product::new(
            &request.name,
            &request.sku,
            request.description,
            request.price_cents,
        );

        self.repository.create(product).await
    }

    /// Get a product by public UUID
    pub async fn get(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        self.repository.get(id).await
    }

    /// List products with offset/limit pagination; limit is clamped to 1..=100
    pub async fn list(
        &self,
        offset: i64,
        limit: Option<i64>,
    ) -> Result<Vec<Product>, DomainError> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        self.repository.list(offset.max(0), limit).await
    }

    /// Count all products
    pub async fn count(&self) -> Result<i64, DomainError> {
        self.repository.count().await
    }

    /// Apply a partial update to a product
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateProductRequest,
    ) -> Result<Product, DomainError> {
        let mut product = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Product '{}' not found", id)))?;

        if let Some(name) = request.name {
            validate_name(&name).map_err(|e| DomainError::validation(e.to_string()))?;
            product.set_name(name);
        }

        if let Some(description) = request.description {
            validate_description(&description)
                .map_err(|e| DomainError::validation(e.to_string()))?;
            product.set_description(Some(description));
        }

        if let Some(price_cents) = request.price_cents {
            validate_price_cents(price_cents)
                .map_err(|e| DomainError::validation(e.to_string()))?;
            product.set_price_cents(price_cents);
        }

        if let Some(is_active) = request.is_active {
            if is_active {
                product.activate();
            } else {
                product.deactivate();
            }
        }

        self.repository.update(&product).await
    }

    /// Delete a product; returns false when no such product existed
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.repository.delete(id).await
    }
}
