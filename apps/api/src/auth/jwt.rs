//! JWT access-token generation/validation and opaque token hashing.
//!
//! Access tokens are HS256-signed JWTs carrying a [`Claims`] payload. Refresh
//! and password-reset tokens are opaque random strings; only their SHA-256
//! digest is stored so a database leak does not compromise live sessions.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::Config;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject — the profile id.
    pub sub: Uuid,
    /// The subject's subscription tier at issue time.
    pub tier: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Generates an HS256 access token for the given profile.
pub fn generate_access_token(
    user_id: Uuid,
    tier: &str,
    config: &Config,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.access_token_expiry_mins * 60;

    let claims = Claims {
        sub: user_id,
        tier: tier.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// Validates and decodes an access token, returning the embedded [`Claims`].
/// Signature and expiration are checked automatically.
pub fn validate_token(
    token: &str,
    config: &Config,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Generates an opaque random token, returning `(plaintext, sha256_hex)`.
/// The plaintext goes to the client; only the hash is persisted.
pub fn generate_opaque_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_opaque_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest of an opaque token, for storage and lookup.
pub fn hash_opaque_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://unused".to_string(),
            jwt_secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 14,
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn generate_and_validate_access_token() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token =
            generate_access_token(user_id, "pro", &config).expect("token generation succeeds");

        let claims = validate_token(&token, &config).expect("token validation succeeds");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.tier, "pro");
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn expired_token_fails() {
        let config = test_config();

        // Expired well past the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            tier: "starter".to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .expect("encoding succeeds");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn tampered_secret_fails() {
        let config = test_config();
        let token = generate_access_token(Uuid::new_v4(), "starter", &config).unwrap();

        let mut other = test_config();
        other.jwt_secret = "a-different-secret-entirely".to_string();
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn opaque_token_hash_is_stable() {
        let (plaintext, hash) = generate_opaque_token();
        assert_eq!(hash, hash_opaque_token(&plaintext));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
