//! Bearer token authentication extractor

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::auth::{
    require_all_permissions, require_any_permission, require_any_role, AuthenticatedUser,
};

/// Extractor that requires a valid bearer token.
///
/// Verifies the token against the configured provider's JWKS and resolves
/// the claims into an [`AuthenticatedUser`]. Rejects with 401 on any
/// verification failure.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedUser);

impl CurrentUser {
    /// Require all of the given permissions, or fail with 403
    pub fn require_all(&self, permissions: &[&str]) -> Result<(), ApiError> {
        require_all_permissions(&self.0, permissions).map_err(ApiError::from)
    }

    /// Require at least one of the given permissions, or fail with 403
    pub fn require_any(&self, permissions: &[&str]) -> Result<(), ApiError> {
        require_any_permission(&self.0, permissions).map_err(ApiError::from)
    }

    /// Require at least one of the given roles, or fail with 403
    pub fn require_role(&self, roles: &[&str]) -> Result<(), ApiError> {
        require_any_role(&self.0, roles).map_err(ApiError::from)
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        debug!("Verifying bearer token");

        let user = state
            .token_verifier
            .verify(&token)
            .await
            .map_err(ApiError::from)?;

        Ok(CurrentUser(user))
    }
}

/// Extract the bearer token from the Authorization header
pub fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }

        return Err(ApiError::unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>",
        ));
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide a token via 'Authorization: Bearer <token>' header",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};

    fn user_with_permissions(permissions: &[&str]) -> CurrentUser {
        CurrentUser(AuthenticatedUser {
            subject: "auth0|test-user".to_string(),
            email: None,
            email_verified: false,
            roles: vec![],
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        })
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer eyJhbGciOiJSUzI1NiJ9.test".parse().unwrap(),
        );

        let result = extract_bearer_token(&headers);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "eyJhbGciOiJSUzI1NiJ9.test");
    }

    #[test]
    fn test_missing_token() {
        let headers = HeaderMap::new();

        let result = extract_bearer_token(&headers);
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invalid_auth_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Basic dXNlcjpwYXNz".parse().unwrap(),
        );

        let result = extract_bearer_token(&headers);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_trimmed_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer   token-with-spaces   ".parse().unwrap(),
        );

        let result = extract_bearer_token(&headers);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "token-with-spaces");
    }

    #[test]
    fn test_require_all_returns_forbidden() {
        let user = user_with_permissions(&["users:read"]);

        assert!(user.require_all(&["users:read"]).is_ok());

        let err = user.require_all(&["users:read", "users:write"]).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_require_any_returns_forbidden() {
        let user = user_with_permissions(&["products:read"]);

        assert!(user.require_any(&["products:read", "products:write"]).is_ok());

        let err = user.require_any(&["users:write"]).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}
