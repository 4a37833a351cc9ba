//! JWT verification against a provider's published key set

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tracing::{debug, warn};

use super::jwks::{Jwk, JwkSet, JwksClient};
use crate::domain::auth::{AuthError, AuthenticatedUser, Claims};

/// Verifies bearer tokens issued by an external OAuth2 provider.
///
/// Verification order: decode the header for `kid`, resolve the signing key
/// from the (cached) JWKS, then check signature, issuer, audience, and
/// expiration in one `jsonwebtoken` pass.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    jwks: JwksClient,
    issuer: String,
    audience: Option<String>,
    algorithm: Algorithm,
}

impl TokenVerifier {
    pub fn new(
        jwks: JwksClient,
        issuer: impl Into<String>,
        audience: Option<String>,
        algorithm: Algorithm,
    ) -> Self {
        Self {
            jwks,
            issuer: issuer.into(),
            audience,
            algorithm,
        }
    }

    /// Verify a token, fetching the provider key set as needed.
    ///
    /// An unknown `kid` triggers exactly one forced JWKS refresh before
    /// failing, so rotated provider keys are picked up without waiting for
    /// the cache TTL.
    pub async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let keys = self.jwks.get().await?;

        match self.verify_with_keys(token, &keys) {
            Err(AuthError::UnknownKeyId(kid)) => {
                debug!(kid = %kid, "Key ID not in cached JWKS, refreshing");
                let keys = self.jwks.refresh().await?;
                self.verify_with_keys(token, &keys)
            }
            result => result,
        }
    }

    /// Verify a token against an already-fetched key set
    pub fn verify_with_keys(
        &self,
        token: &str,
        keys: &JwkSet,
    ) -> Result<AuthenticatedUser, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::Malformed(e.to_string()))?;

        if header.alg != self.algorithm {
            return Err(AuthError::UnsupportedAlgorithm(format!("{:?}", header.alg)));
        }

        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;

        let jwk = keys
            .find(&kid)
            .ok_or_else(|| AuthError::UnknownKeyId(kid.clone()))?;

        let decoding_key = decoding_key_from_jwk(jwk)?;

        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);

        match &self.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        let token_data =
            decode::<Claims>(token, &decoding_key, &validation).map_err(map_jwt_error)?;

        debug!(subject = %token_data.claims.sub, "Token verified");

        Ok(AuthenticatedUser::from(token_data.claims))
    }
}

/// Build a decoding key from a JWK's public components
fn decoding_key_from_jwk(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    match jwk.kty.as_str() {
        "RSA" => {
            let n = jwk
                .n
                .as_ref()
                .ok_or_else(|| AuthError::InvalidKey("RSA key missing 'n' (modulus)".into()))?;
            let e = jwk
                .e
                .as_ref()
                .ok_or_else(|| AuthError::InvalidKey("RSA key missing 'e' (exponent)".into()))?;

            DecodingKey::from_rsa_components(n, e)
                .map_err(|e| AuthError::InvalidKey(e.to_string()))
        }
        other => Err(AuthError::InvalidKey(format!(
            "Unsupported key type: {}",
            other
        ))),
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
        ErrorKind::InvalidAudience => AuthError::InvalidAudience,
        ErrorKind::InvalidAlgorithm => {
            AuthError::UnsupportedAlgorithm("token/key algorithm mismatch".to_string())
        }
        _ => {
            warn!(error = %err, "JWT validation failed");
            AuthError::Malformed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::{Duration as ChronoDuration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use rsa::pkcs1::EncodeRsaPrivateKey;
    use rsa::traits::PublicKeyParts;
    use rsa::RsaPrivateKey;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ISSUER: &str = "https://test.auth.example.com/";
    const AUDIENCE: &str = "https://api.example.com";

    struct TestKey {
        encoding_key: EncodingKey,
        jwk: Jwk,
    }

    fn generate_key(kid: &str) -> TestKey {
        use rand::rngs::OsRng;

        let mut rng = OsRng;
        let private_key = RsaPrivateKey::new(&mut rng, 2048).unwrap();

        let private_pem = private_key
            .to_pkcs1_pem(rsa::pkcs1::LineEnding::LF)
            .unwrap();
        let encoding_key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).unwrap();

        let public_key = private_key.to_public_key();
        let jwk = Jwk {
            kty: "RSA".to_string(),
            kid: Some(kid.to_string()),
            alg: Some("RS256".to_string()),
            key_use: Some("sig".to_string()),
            n: Some(URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be())),
            e: Some(URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be())),
        };

        TestKey { encoding_key, jwk }
    }

    fn sign_token(key: &TestKey, kid: &str, claims: serde_json::Value) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(kid.to_string());
        encode(&header, &claims, &key.encoding_key).unwrap()
    }

    fn standard_claims(permissions: &[&str]) -> serde_json::Value {
        let now = Utc::now();
        json!({
            "sub": "auth0|test-user",
            "iss": ISSUER,
            "aud": AUDIENCE,
            "exp": (now + ChronoDuration::hours(1)).timestamp(),
            "iat": now.timestamp(),
            "permissions": permissions,
        })
    }

    fn verifier_for(key: &TestKey) -> (TokenVerifier, JwkSet) {
        let jwks = JwkSet {
            keys: vec![key.jwk.clone()],
        };
        let client =
            JwksClient::new("https://unused.example.com/jwks.json", Duration::from_secs(60))
                .unwrap();
        let verifier = TokenVerifier::new(
            client,
            ISSUER,
            Some(AUDIENCE.to_string()),
            Algorithm::RS256,
        );

        (verifier, jwks)
    }

    #[test]
    fn test_valid_token_exposes_subject_and_permissions() {
        let key = generate_key("test-key");
        let (verifier, jwks) = verifier_for(&key);

        let token = sign_token(&key, "test-key", standard_claims(&["users:read", "users:write"]));

        let user = verifier.verify_with_keys(&token, &jwks).unwrap();
        assert_eq!(user.subject, "auth0|test-user");
        assert!(user.has_all_permissions(&["users:read", "users:write"]));
    }

    #[test]
    fn test_expired_token_fails_regardless_of_permissions() {
        let key = generate_key("test-key");
        let (verifier, jwks) = verifier_for(&key);

        let now = Utc::now();
        let claims = json!({
            "sub": "auth0|test-user",
            "iss": ISSUER,
            "aud": AUDIENCE,
            "exp": (now - ChronoDuration::hours(1)).timestamp(),
            "iat": (now - ChronoDuration::hours(2)).timestamp(),
            "permissions": ["users:read", "users:write", "products:write"],
        });
        let token = sign_token(&key, "test-key", claims);

        let err = verifier.verify_with_keys(&token, &jwks).unwrap_err();
        assert!(matches!(err, AuthError::Expired));
    }

    #[test]
    fn test_unknown_key_id() {
        let key = generate_key("test-key");
        let (verifier, jwks) = verifier_for(&key);

        let token = sign_token(&key, "other-key", standard_claims(&[]));

        let err = verifier.verify_with_keys(&token, &jwks).unwrap_err();
        match err {
            AuthError::UnknownKeyId(kid) => assert_eq!(kid, "other-key"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_key_id() {
        let key = generate_key("test-key");
        let (verifier, jwks) = verifier_for(&key);

        // No kid in the header
        let token = encode(
            &Header::new(Algorithm::RS256),
            &standard_claims(&[]),
            &key.encoding_key,
        )
        .unwrap();

        let err = verifier.verify_with_keys(&token, &jwks).unwrap_err();
        assert!(matches!(err, AuthError::MissingKeyId));
    }

    #[test]
    fn test_signature_from_wrong_key() {
        let key = generate_key("test-key");
        let other_key = generate_key("test-key");
        let (verifier, jwks) = verifier_for(&key);

        // Same kid, signed by a different private key
        let token = sign_token(&other_key, "test-key", standard_claims(&[]));

        let err = verifier.verify_with_keys(&token, &jwks).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn test_wrong_issuer() {
        let key = generate_key("test-key");
        let (verifier, jwks) = verifier_for(&key);

        let now = Utc::now();
        let claims = json!({
            "sub": "auth0|test-user",
            "iss": "https://evil.example.com/",
            "aud": AUDIENCE,
            "exp": (now + ChronoDuration::hours(1)).timestamp(),
        });
        let token = sign_token(&key, "test-key", claims);

        let err = verifier.verify_with_keys(&token, &jwks).unwrap_err();
        assert!(matches!(err, AuthError::InvalidIssuer));
    }

    #[test]
    fn test_wrong_audience() {
        let key = generate_key("test-key");
        let (verifier, jwks) = verifier_for(&key);

        let now = Utc::now();
        let claims = json!({
            "sub": "auth0|test-user",
            "iss": ISSUER,
            "aud": "https://other-api.example.com",
            "exp": (now + ChronoDuration::hours(1)).timestamp(),
        });
        let token = sign_token(&key, "test-key", claims);

        let err = verifier.verify_with_keys(&token, &jwks).unwrap_err();
        assert!(matches!(err, AuthError::InvalidAudience));
    }

    #[test]
    fn test_audience_check_disabled_when_unconfigured() {
        let key = generate_key("test-key");
        let jwks = JwkSet {
            keys: vec![key.jwk.clone()],
        };
        let client =
            JwksClient::new("https://unused.example.com/jwks.json", Duration::from_secs(60))
                .unwrap();
        let verifier = TokenVerifier::new(client, ISSUER, None, Algorithm::RS256);

        let now = Utc::now();
        let claims = json!({
            "sub": "auth0|test-user",
            "iss": ISSUER,
            "exp": (now + ChronoDuration::hours(1)).timestamp(),
        });
        let token = sign_token(&key, "test-key", claims);

        assert!(verifier.verify_with_keys(&token, &jwks).is_ok());
    }

    #[test]
    fn test_malformed_token() {
        let key = generate_key("test-key");
        let (verifier, jwks) = verifier_for(&key);

        let err = verifier.verify_with_keys("not-a-jwt", &jwks).unwrap_err();
        assert!(matches!(err, AuthError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_verify_fetches_jwks_once() {
        let key = generate_key("test-key");
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"keys": [key.jwk.clone()]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = JwksClient::new(
            format!("{}/.well-known/jwks.json", server.uri()),
            Duration::from_secs(3600),
        )
        .unwrap();
        let verifier = TokenVerifier::new(
            client,
            ISSUER,
            Some(AUDIENCE.to_string()),
            Algorithm::RS256,
        );

        let token = sign_token(&key, "test-key", standard_claims(&["users:read"]));

        let first = verifier.verify(&token).await.unwrap();
        assert_eq!(first.subject, "auth0|test-user");

        // Second verification is served from the JWKS cache
        verifier.verify(&token).await.unwrap();
    }

    #[tokio::test]
    async fn test_verify_refreshes_on_rotated_key() {
        let old_key = generate_key("old-key");
        let new_key = generate_key("new-key");
        let server = MockServer::start().await;

        // First response only has the old key; refresh returns the new set
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"keys": [old_key.jwk.clone()]})),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"keys": [old_key.jwk.clone(), new_key.jwk.clone()]})),
            )
            .mount(&server)
            .await;

        let client = JwksClient::new(
            format!("{}/.well-known/jwks.json", server.uri()),
            Duration::from_secs(3600),
        )
        .unwrap();
        let verifier = TokenVerifier::new(
            client,
            ISSUER,
            Some(AUDIENCE.to_string()),
            Algorithm::RS256,
        );

        // Prime the cache with the pre-rotation key set
        let old_token = sign_token(&old_key, "old-key", standard_claims(&[]));
        verifier.verify(&old_token).await.unwrap();

        // A token from the rotated key forces one refresh and then verifies
        let new_token = sign_token(&new_key, "new-key", standard_claims(&[]));
        let user = verifier.verify(&new_token).await.unwrap();
        assert_eq!(user.subject, "auth0|test-user");
    }
}
