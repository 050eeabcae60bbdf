//! Claims of tokens issued by the identity provider

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Role carried by unauthenticated (public key) tokens
pub const ANON_ROLE: &str = "anon";

/// JWT claims as issued by the hosted auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    /// User id
    pub sub: String,
    pub aud: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl AuthClaims {
    /// Sign claims (used by tooling and tests; production tokens come from the provider)
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Verify signature, expiry and audience
    pub fn from_token(
        token: &str,
        secret: &str,
        audience: &str,
    ) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let mut validation = Validation::default();
        validation.set_audience(&[audience]);
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(token_data.claims)
    }

    pub fn is_anonymous(&self) -> bool {
        self.role.as_deref() == Some(ANON_ROLE)
    }

    pub fn require_write(&self) -> Result<(), AppError> {
        if self.is_anonymous() {
            Err(AppError::Authorization("Anonymous tokens cannot modify records".to_string()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const SECRET: &str = "test-secret";

    fn claims(role: &str, aud: &str) -> AuthClaims {
        AuthClaims {
            sub: "6f1c8f2e-9d8a-4b0e-9a53-0d2b1c7e4a11".to_string(),
            aud: aud.to_string(),
            exp: Utc::now().timestamp() + 3600,
            iat: Some(Utc::now().timestamp()),
            email: Some("site.manager@example.com".to_string()),
            role: Some(role.to_string()),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let token = claims("authenticated", "authenticated").create_token(SECRET).unwrap();
        let decoded = AuthClaims::from_token(&token, SECRET, "authenticated").unwrap();
        assert_eq!(decoded.email.as_deref(), Some("site.manager@example.com"));
        assert!(decoded.require_write().is_ok());
    }

    #[test]
    fn test_wrong_audience_is_rejected() {
        let token = claims("authenticated", "someone-else").create_token(SECRET).unwrap();
        assert!(AuthClaims::from_token(&token, SECRET, "authenticated").is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = claims("authenticated", "authenticated").create_token("other").unwrap();
        assert!(AuthClaims::from_token(&token, SECRET, "authenticated").is_err());
    }

    #[test]
    fn test_anonymous_cannot_write() {
        let anon = claims(ANON_ROLE, "authenticated");
        assert!(matches!(anon.require_write(), Err(AppError::Authorization(_))));
    }
}
