//! User service for CRUD operations

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::user::{
    validate_email, validate_full_name, validate_username, User, UserRepository,
};
use crate::domain::DomainError;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
}

/// Request for partially updating a user; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub is_active: Option<bool>,
}

const MAX_PAGE_SIZE: i64 = 100;
const DEFAULT_PAGE_SIZE: i64 = 50;

/// User service wrapping a repository with validation and uniqueness rules
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        validate_username(&request.username)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(full_name) = &request.full_name {
            validate_full_name(full_name).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        if self.repository.email_exists(&request.email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                request.email
            )));
        }

        let user = User::new(&request.username, &request.email, request.full_name);

        self.repository.create(user).await
    }

    /// Get a user by public UUID
    pub async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    /// List users with offset/limit pagination; limit is clamped to 1..=100
    pub async fn list(&self, offset: i64, limit: Option<i64>) -> Result<Vec<User>, DomainError> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        self.repository.list(offset.max(0), limit).await
    }

    /// Count all users
    pub async fn count(&self) -> Result<i64, DomainError> {
        self.repository.count().await
    }

    /// Apply a partial update to a user
    pub async fn update(&self, id: Uuid, request: UpdateUserRequest) -> Result<User, DomainError> {
        let mut user = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        if let Some(username) = request.username {
            validate_username(&username).map_err(|e| DomainError::validation(e.to_string()))?;

            if username != user.username() && self.repository.username_exists(&username).await? {
                return Err(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    username
                )));
            }

            user.set_username(username);
        }

        if let Some(email) = request.email {
            validate_email(&email).map_err(|e| DomainError::validation(e.to_string()))?;

            if email != user.email() && self.repository.email_exists(&email).await? {
                return Err(DomainError::conflict(format!(
                    "Email '{}' already exists",
                    email
                )));
            }

            user.set_email(email);
        }

        if let Some(full_name) = request.full_name {
            validate_full_name(&full_name).map_err(|e| DomainError::validation(e.to_string()))?;
            user.set_full_name(Some(full_name));
        }

        if let Some(is_active) = request.is_active {
            if is_active {
                user.activate();
            } else {
                user.deactivate();
            }
        }

        self.repository.update(&user).await
    }

    /// Delete a user; returns false when no such user existed
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.repository.delete(id).await
    }
}
