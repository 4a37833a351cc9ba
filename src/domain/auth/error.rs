use thiserror::Error;

/// Authentication and authorization failures.
///
/// Every variant except the permission/role ones maps to an unauthorized
/// response at the transport boundary; the permission/role variants map to
/// forbidden.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token header missing key ID (kid)")]
    MissingKeyId,

    #[error("No matching signing key for key ID '{0}'")]
    UnknownKeyId(String),

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid issuer")]
    InvalidIssuer,

    #[error("Invalid audience")]
    InvalidAudience,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid signing key material: {0}")]
    InvalidKey(String),

    #[error("Unable to fetch signing keys: {0}")]
    JwksFetch(String),

    #[error("Insufficient permissions. Missing: {}", .missing.join(", "))]
    InsufficientPermissions { missing: Vec<String> },

    #[error("Insufficient roles. Required one of: {}", .required.join(", "))]
    InsufficientRoles { required: Vec<String> },
}

impl AuthError {
    /// Whether this failure is an authorization (forbidden) failure rather
    /// than an authentication (unauthorized) one.
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self,
            Self::InsufficientPermissions { .. } | Self::InsufficientRoles { .. }
        )
    }
}
