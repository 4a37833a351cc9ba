//! Token verification against an external identity provider

pub mod jwks;
pub mod verifier;

pub use jwks::{Jwk, JwkSet, JwksClient};
pub use verifier::TokenVerifier;
