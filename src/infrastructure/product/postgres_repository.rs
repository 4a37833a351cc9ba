//! PostgreSQL product repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::product::{Product, ProductRepository};
use crate::domain::DomainError;

const PRODUCT_COLUMNS: &str =
    "external_id, name, sku, description, price_cents, is_active, created_at, updated_at";

/// PostgreSQL implementation of ProductRepository
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE external_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get product: {}", e)))?;

        row.map(|r| row_to_product(&r)).transpose()
    }

    async fn get_by_sku(&self, sku: &str) -> Result<Option<Product>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = $1"
        ))
        .bind(sku)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get product by SKU: {}", e)))?;

        row.map(|r| row_to_product(&r)).transpose()
    }

    async fn create(&self, product: Product) -> Result<Product, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO products (external_id, name, sku, description, price_cents,
                                  is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(product.id())
        .bind(product.name())
        .bind(product.sku())
        .bind(product.description())
        .bind(product.price_cents())
        .bind(product.is_active())
        .bind(product.created_at())
        .bind(product.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &product))?;

        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<Product, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price_cents = $4, is_active = $5, updated_at = $6
            WHERE external_id = $1
            "#,
        )
        .bind(product.id())
        .bind(product.name())
        .bind(product.description())
        .bind(product.price_cents())
        .bind(product.is_active())
        .bind(product.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update product: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Product '{}' not found",
                product.id()
            )));
        }

        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE external_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete product: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at, id OFFSET $1 LIMIT $2"
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list products: {}", e)))?;

        rows.iter().map(row_to_product).collect()
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count products: {}", e)))
    }
}

fn row_to_product(row: &sqlx::postgres::PgRow) -> Result<Product, DomainError> {
    Ok(Product::restore(
        row.get("external_id"),
        row.get("name"),
        row.get("sku"),
        row.get("description"),
        row.get("price_cents"),
        row.get("is_active"),
        row.get("created_at"),
        row.get("updated_at"),
    ))
}

fn map_unique_violation(err: sqlx::Error, product: &Product) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some(c) if c.contains("sku") => {
                    DomainError::conflict(format!("SKU '{}' already exists", product.sku()))
                }
                _ => DomainError::conflict(format!("Product '{}' already exists", product.id())),
            };
        }
    }

    DomainError::storage(format!("Failed to write product: {}", err))
}
