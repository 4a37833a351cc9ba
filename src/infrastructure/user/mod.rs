//! User persistence and services

pub mod postgres_repository;
pub mod repository;
pub mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UpdateUserRequest, UserService};
