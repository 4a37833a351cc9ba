//! Product domain types

pub mod entity;
pub mod repository;
pub mod validation;

pub use entity::Product;
pub use repository::ProductRepository;
pub use validation::{
    validate_description, validate_name, validate_price_cents, validate_sku,
    ProductValidationError,
};
