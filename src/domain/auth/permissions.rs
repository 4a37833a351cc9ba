//! Permission and role checks over an authenticated identity
//!
//! Flat string matching only: a required permission either appears in the
//! token's permission list or it does not.

use tracing::debug;

use super::claims::AuthenticatedUser;
use super::error::AuthError;

/// Require that the user holds every one of the given permissions.
pub fn require_all_permissions(
    user: &AuthenticatedUser,
    required: &[&str],
) -> Result<(), AuthError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|p| !user.has_permission(p))
        .map(|p| p.to_string())
        .collect();

    if !missing.is_empty() {
        debug!(
            subject = %user.subject,
            missing = ?missing,
            "Permission check failed"
        );
        return Err(AuthError::InsufficientPermissions { missing });
    }

    Ok(())
}

/// Require that the user holds at least one of the given permissions.
pub fn require_any_permission(
    user: &AuthenticatedUser,
    required: &[&str],
) -> Result<(), AuthError> {
    if required.is_empty() || user.has_any_permission(required) {
        return Ok(());
    }

    debug!(
        subject = %user.subject,
        required = ?required,
        "Permission check failed"
    );

    Err(AuthError::InsufficientPermissions {
        missing: required.iter().map(|p| p.to_string()).collect(),
    })
}

/// Require that the user holds at least one of the given roles.
pub fn require_any_role(user: &AuthenticatedUser, required: &[&str]) -> Result<(), AuthError> {
    if required.is_empty() || user.has_any_role(required) {
        return Ok(());
    }

    debug!(
        subject = %user.subject,
        required = ?required,
        "Role check failed"
    );

    Err(AuthError::InsufficientRoles {
        required: required.iter().map(|r| r.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(permissions: &[&str], roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            subject: "auth0|test-user".to_string(),
            email: None,
            email_verified: false,
            roles: roles.iter().map(|r| r.to_string()).collect(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_require_all_passes() {
        let user = user(&["users:read", "users:write"], &[]);
        assert!(require_all_permissions(&user, &["users:read", "users:write"]).is_ok());
    }

    #[test]
    fn test_require_all_reports_only_missing() {
        let user = user(&["users:read"], &[]);

        let err = require_all_permissions(&user, &["users:read", "users:write"]).unwrap_err();
        match err {
            AuthError::InsufficientPermissions { missing } => {
                assert_eq!(missing, vec!["users:write".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_require_all_empty_requirement() {
        let user = user(&[], &[]);
        assert!(require_all_permissions(&user, &[]).is_ok());
    }

    #[test]
    fn test_require_any_passes_on_one_match() {
        let user = user(&["products:read"], &[]);
        assert!(require_any_permission(&user, &["products:read", "products:write"]).is_ok());
    }

    #[test]
    fn test_require_any_fails_without_match() {
        let user = user(&["products:read"], &[]);
        assert!(require_any_permission(&user, &["users:read"]).is_err());
    }

    #[test]
    fn test_require_any_role() {
        let user = user(&[], &["admin"]);

        assert!(require_any_role(&user, &["admin", "superuser"]).is_ok());
        assert!(require_any_role(&user, &["superuser"]).is_err());
    }
}
