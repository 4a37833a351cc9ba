//! User domain types

pub mod entity;
pub mod repository;
pub mod validation;

pub use entity::User;
pub use repository::UserRepository;
pub use validation::{validate_email, validate_full_name, validate_username, UserValidationError};
