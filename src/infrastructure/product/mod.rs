//! Product persistence and services

pub mod postgres_repository;
pub mod repository;
pub mod service;

pub use postgres_repository::PostgresProductRepository;
pub use repository::InMemoryProductRepository;
pub use service::{CreateProductRequest, ProductService, UpdateProductRequest};
