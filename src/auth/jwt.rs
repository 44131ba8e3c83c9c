//! JWT access-token generation and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload: the subject
//! id, whether it is a staff or customer account, the role and permission
//! list, and a 7-day expiry. There is no server-side session store and no
//! revocation; the token alone is the session.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of account a token was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    User,
    Customer,
}

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the account's document id.
    pub sub: Uuid,
    /// Staff or customer account.
    pub kind: SubjectKind,
    /// Role name for staff accounts (e.g. `"admin"`); `"customer"` otherwise.
    pub role: String,
    /// Permission claims decoded client-side to gate role-specific views.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Default token lifetime in days.
const DEFAULT_EXPIRY_DAYS: i64 = 7;

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in days (default: 7).
    pub expiry_days: i64,
}

impl JwtConfig {
    /// Build a config with the default 7-day expiry.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiry_days: DEFAULT_EXPIRY_DAYS,
        }
    }
}

/// Generate an HS256 token for the given subject.
pub fn generate_token(
    subject: Uuid,
    kind: SubjectKind,
    role: &str,
    permissions: Vec<String>,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.expiry_days * 24 * 60 * 60;

    let claims = Claims {
        sub: subject,
        kind,
        role: role.to_string(),
        permissions,
        exp,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig::new("test-secret-that-is-long-enough-for-hmac")
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = test_config();
        let id = Uuid::new_v4();
        let token = generate_token(
            id,
            SubjectKind::User,
            "admin",
            vec!["transactions:read".to_string()],
            &config,
        )
        .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, id);
        assert_eq!(claims.kind, SubjectKind::User);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.permissions, vec!["transactions:read".to_string()]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expiry_is_seven_days_out() {
        let config = test_config();
        let token = generate_token(Uuid::new_v4(), SubjectKind::Customer, "customer", vec![], &config)
            .expect("token generation should succeed");
        let claims = validate_token(&token, &config).expect("validation should succeed");

        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Manually create an already-expired token, well beyond the
        // default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            kind: SubjectKind::User,
            role: "employee".to_string(),
            permissions: vec![],
            exp: now - 300,
            iat: now - 600,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = validate_token(&token, &config);
        assert!(result.is_err(), "expired token must fail validation");
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig::new("secret-alpha");
        let config_b = JwtConfig::new("secret-bravo");

        let token =
            generate_token(Uuid::new_v4(), SubjectKind::User, "employee", vec![], &config_a)
                .expect("token generation should succeed");

        let result = validate_token(&token, &config_b);
        assert!(
            result.is_err(),
            "token signed with a different secret must fail"
        );
    }
}
