//! Authenticated identity endpoint

use serde::Serialize;
use tracing::debug;

use crate::api::middleware::CurrentUser;
use crate::api::types::Json;

/// Response echoing the verified identity
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub email_verified: bool,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

/// GET /api/v1/me
///
/// Any valid token passes; no permission requirement.
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    debug!(subject = %user.subject, "Identity requested");

    Json(MeResponse {
        subject: user.subject,
        email: user.email,
        email_verified: user.email_verified,
        roles: user.roles,
        permissions: user.permissions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::AuthenticatedUser;

    #[tokio::test]
    async fn test_get_me_echoes_identity() {
        let user = AuthenticatedUser {
            subject: "auth0|test-user".to_string(),
            email: Some("test@example.com".to_string()),
            email_verified: true,
            roles: vec!["member".to_string()],
            permissions: vec!["users:read".to_string()],
        };

        let response = get_me(CurrentUser(user)).await;

        assert_eq!(response.subject, "auth0|test-user");
        assert_eq!(response.email.as_deref(), Some("test@example.com"));
        assert_eq!(response.permissions, vec!["users:read".to_string()]);
    }
}
