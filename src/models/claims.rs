//! Bearer token claims

use serde::{Deserialize, Serialize};

/// JWT claims accepted by the authorization gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Claims for `sub` valid for `ttl` from now
    pub fn new(sub: impl Into<String>, ttl: chrono::Duration) -> Self {
        let now = chrono::Utc::now();
        Self {
            sub: sub.into(),
            exp: (now + ttl).timestamp(),
            iat: Some(now.timestamp()),
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token (HS256 signature and expiry)
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let claims = TokenClaims::new("reader", chrono::Duration::hours(1));
        let token = claims.create_token("secret").unwrap();
        let decoded = TokenClaims::from_token(&token, "secret").unwrap();
        assert_eq!(decoded.sub, "reader");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenClaims::new("reader", chrono::Duration::hours(1))
            .create_token("secret")
            .unwrap();
        assert!(TokenClaims::from_token(&token, "other").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Beyond the default 60s leeway
        let token = TokenClaims::new("reader", chrono::Duration::minutes(-5))
            .create_token("secret")
            .unwrap();
        assert!(TokenClaims::from_token(&token, "secret").is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(TokenClaims::from_token("not-a-token", "secret").is_err());
    }
}
