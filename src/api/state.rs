//! Application state for shared services

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::product::ProductRepository;
use crate::domain::user::UserRepository;
use crate::domain::{DomainError, Product, User};
use crate::infrastructure::auth::TokenVerifier;
use crate::infrastructure::product::{
    CreateProductRequest, ProductService, UpdateProductRequest,
};
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub product_service: Arc<dyn ProductServiceTrait>,
    pub token_verifier: Arc<TokenVerifier>,
    /// Present when running against PostgreSQL; readiness reports on it
    pub db: Option<PgPool>,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        product_service: Arc<dyn ProductServiceTrait>,
        token_verifier: Arc<TokenVerifier>,
        db: Option<PgPool>,
    ) -> Self {
        Self {
            user_service,
            product_service,
            token_verifier,
            db,
        }
    }
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    async fn list(&self, offset: i64, limit: Option<i64>) -> Result<Vec<User>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    async fn update(&self, id: Uuid, request: UpdateUserRequest) -> Result<User, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

#[async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }

    async fn list(&self, offset: i64, limit: Option<i64>) -> Result<Vec<User>, DomainError> {
        UserService::list(self, offset, limit).await
    }

    async fn count(&self) -> Result<i64, DomainError> {
        UserService::count(self).await
    }

    async fn update(&self, id: Uuid, request: UpdateUserRequest) -> Result<User, DomainError> {
        UserService::update(self, id, request).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        UserService::delete(self, id).await
    }
}

/// Trait for product service operations
#[async_trait]
pub trait ProductServiceTrait: Send + Sync {
    async fn create(&self, request: CreateProductRequest) -> Result<Product, DomainError>;
    async fn get(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    async fn list(&self, offset: i64, limit: Option<i64>) -> Result<Vec<Product>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    async fn update(&self, id: Uuid, request: UpdateProductRequest)
        -> Result<Product, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

#[async_trait]
impl<R: ProductRepository + 'static> ProductServiceTrait for ProductService<R> {
    async fn create(&self, request: CreateProductRequest) -> Result<Product, DomainError> {
        ProductService::create(self, request).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        ProductService::get(self, id).await
    }

    async fn list(&self, offset: i64, limit: Option<i64>) -> Result<Vec<Product>, DomainError> {
        ProductService::list(self, offset, limit).await
    }

    async fn count(&self) -> Result<i64, DomainError> {
        ProductService::count(self).await
    }

    async fn update(
        &self,
        id: Uuid,
        request: UpdateProductRequest,
    ) -> Result<Product, DomainError> {
        ProductService::update(self, id, request).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        ProductService::delete(self, id).await
    }
}
