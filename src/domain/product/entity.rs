//! Product entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product entity.
///
/// `sku` is the merchant-facing unique code; `id` is the public UUID used in
/// API routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: Uuid,
    name: String,
    sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    price_cents: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product with a fresh UUID and current timestamps
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        description: Option<String>,
        price_cents: i64,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sku: sku.into(),
            description,
            price_cents,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a product from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        name: String,
        sku: String,
        description: Option<String>,
        price_cents: i64,
        is_active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            sku,
            description,
            price_cents,
            is_active,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    pub fn set_price_cents(&mut self, price_cents: i64) {
        self.price_cents = price_cents;
        self.touch();
    }

    /// Take the product off sale
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    /// Put the product back on sale
    pub fn activate(&mut self) {
        if !self.is_active {
            self.is_active = true;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_product() -> Product {
        Product::new("Widget", "WGT-001", Some("A widget".to_string()), 1999)
    }

    #[test]
    fn test_product_creation() {
        let product = create_test_product();

        assert_eq!(product.name(), "Widget");
        assert_eq!(product.sku(), "WGT-001");
        assert_eq!(product.description(), Some("A widget"));
        assert_eq!(product.price_cents(), 1999);
        assert!(product.is_active());
    }

    #[test]
    fn test_product_price_update() {
        let mut product = create_test_product();
        let original_updated = product.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        product.set_price_cents(2499);
        assert_eq!(product.price_cents(), 2499);
        assert!(product.updated_at() > original_updated);
    }

    #[test]
    fn test_product_deactivate_and_activate() {
        let mut product = create_test_product();

        product.deactivate();
        assert!(!product.is_active());

        product.activate();
        assert!(product.is_active());
    }

    #[test]
    fn test_product_restore_round_trip() {
        let original = create_test_product();

        let restored = Product::restore(
            original.id(),
            original.name().to_string(),
            original.sku().to_string(),
            original.description().map(String::from),
            original.price_cents(),
            original.is_active(),
            original.created_at(),
            original.updated_at(),
        );

        assert_eq!(restored.id(), original.id());
        assert_eq!(restored.sku(), original.sku());
        assert_eq!(restored.price_cents(), original.price_cents());
    }
}
