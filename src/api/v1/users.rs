//! User CRUD endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::User;
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

const USERS_READ: &str = "users:read";
const USERS_WRITE: &str = "users:write";

/// Request to create a new user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserApiRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Request to partially update a user
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserApiRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub is_active: Option<bool>,
}

/// User response
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            full_name: user.full_name().map(String::from),
            is_active: user.is_active(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

/// List users response
#[derive(Debug, Clone, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub total: i64,
    pub offset: i64,
}

/// Pagination query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub offset: i64,
    pub limit: Option<i64>,
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    user.require_all(&[USERS_WRITE])?;

    debug!(username = %request.username, "Creating user");

    let created = state
        .user_service
        .create(CreateUserRequest {
            username: request.username,
            email: request.email,
            full_name: request.full_name,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&created))))
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    user.require_all(&[USERS_READ])?;

    debug!(offset = query.offset, "Listing users");

    let users = state
        .user_service
        .list(query.offset, query.limit)
        .await
        .map_err(ApiError::from)?;
    let total = state.user_service.count().await.map_err(ApiError::from)?;

    Ok(Json(ListUsersResponse {
        users: users.iter().map(UserResponse::from).collect(),
        total,
        offset: query.offset,
    }))
}

/// GET /api/v1/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    user.require_all(&[USERS_READ])?;

    debug!(user_id = %user_id, "Getting user");

    let found = state
        .user_service
        .get(user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", user_id)))?;

    Ok(Json(UserResponse::from(&found)))
}

/// PATCH /api/v1/users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    user.require_all(&[USERS_WRITE])?;

    debug!(user_id = %user_id, "Updating user");

    let updated = state
        .user_service
        .update(
            user_id,
            UpdateUserRequest {
                username: request.username,
                email: request.email,
                full_name: request.full_name,
                is_active: request.is_active,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&updated)))
}

/// DELETE /api/v1/users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    user.require_all(&[USERS_WRITE])?;

    debug!(user_id = %user_id, "Deleting user");

    let deleted = state
        .user_service
        .delete(user_id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!(
            "User '{}' not found",
            user_id
        )));
    }

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": user_id
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::test_support::in_memory_state;
    use crate::domain::auth::AuthenticatedUser;

    fn current_user(permissions: &[&str]) -> CurrentUser {
        CurrentUser(AuthenticatedUser {
            subject: "auth0|test-user".to_string(),
            email: None,
            email_verified: false,
            roles: vec![],
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        })
    }

    fn create_request(username: &str, email: &str) -> Json<CreateUserApiRequest> {
        Json(CreateUserApiRequest {
            username: username.to_string(),
            email: email.to_string(),
            full_name: None,
        })
    }

    #[tokio::test]
    async fn test_create_user_requires_write_permission() {
        let state = in_memory_state();

        let err = create_user(
            State(state),
            current_user(&["users:read"]),
            create_request("testuser", "test@example.com"),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let state = in_memory_state();

        let (status, created) = create_user(
            State(state.clone()),
            current_user(&["users:write"]),
            create_request("testuser", "test@example.com"),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.username, "testuser");

        let fetched = get_user(
            State(state),
            current_user(&["users:read"]),
            Path(created.id),
        )
        .await
        .unwrap();

        assert_eq!(fetched.email, "test@example.com");
    }

    #[tokio::test]
    async fn test_get_missing_user_returns_404() {
        let state = in_memory_state();

        let err = get_user(
            State(state),
            current_user(&["users:read"]),
            Path(Uuid::new_v4()),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_duplicate_username_returns_409() {
        let state = in_memory_state();

        create_user(
            State(state.clone()),
            current_user(&["users:write"]),
            create_request("testuser", "a@example.com"),
        )
        .await
        .unwrap();

        let err = create_user(
            State(state),
            current_user(&["users:write"]),
            create_request("testuser", "b@example.com"),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_user() {
        let state = in_memory_state();

        let (_, created) = create_user(
            State(state.clone()),
            current_user(&["users:write"]),
            create_request("testuser", "test@example.com"),
        )
        .await
        .unwrap();

        let updated = update_user(
            State(state),
            current_user(&["users:write"]),
            Path(created.id),
            Json(UpdateUserApiRequest {
                username: None,
                email: None,
                full_name: Some("Test User".to_string()),
                is_active: Some(false),
            }),
        )
        .await
        .unwrap();

        assert_eq!(updated.full_name.as_deref(), Some("Test User"));
        assert!(!updated.is_active);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let state = in_memory_state();

        let (_, created) = create_user(
            State(state.clone()),
            current_user(&["users:write"]),
            create_request("testuser", "test@example.com"),
        )
        .await
        .unwrap();

        delete_user(
            State(state.clone()),
            current_user(&["users:write"]),
            Path(created.id),
        )
        .await
        .unwrap();

        let err = delete_user(
            State(state),
            current_user(&["users:write"]),
            Path(created.id),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_users() {
        let state = in_memory_state();

        for i in 0..3 {
            create_user(
                State(state.clone()),
                current_user(&["users:write"]),
                create_request(&format!("user{i}"), &format!("user{i}@example.com")),
            )
            .await
            .unwrap();
        }

        let response = list_users(
            State(state),
            current_user(&["users:read"]),
            Query(ListQuery::default()),
        )
        .await
        .unwrap();

        assert_eq!(response.users.len(), 3);
        assert_eq!(response.total, 3);
    }
}
