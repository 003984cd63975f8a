//! JWT Token Issuer
//!
//! HS256 tokens signed with the target app's own secret. An app stored
//! without a secret falls back to the service-wide key when one is
//! configured; otherwise issuing fails.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use std::time::Duration;

use crate::domain::entity::{app::App, claims::TokenClaims, user::User};
use crate::domain::token::{TokenError, TokenIssuer};
use crate::domain::value_object::app_secret::AppSecret;

/// HS256 token issuer
#[derive(Debug, Clone)]
pub struct JwtTokenIssuer {
    header: Header,
    fallback_secret: Option<AppSecret>,
}

impl Default for JwtTokenIssuer {
    fn default() -> Self {
        Self {
            header: Header::new(Algorithm::HS256),
            fallback_secret: None,
        }
    }
}

impl JwtTokenIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key used for apps whose stored secret is empty
    pub fn with_fallback_secret(mut self, secret: AppSecret) -> Self {
        self.fallback_secret = (!secret.is_empty()).then_some(secret);
        self
    }

    /// Issue with an explicit issue time
    pub fn issue_at(
        &self,
        user: &User,
        app: &App,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = TokenClaims::new(user, app, issued_at, ttl);
        let key = EncodingKey::from_secret(self.signing_secret(app)?.as_bytes());

        jsonwebtoken::encode(&self.header, &claims, &key)
            .map_err(|e| TokenError::Signing(Box::new(e)))
    }

    fn signing_secret<'a>(&'a self, app: &'a App) -> Result<&'a AppSecret, TokenError> {
        if !app.secret.is_empty() {
            return Ok(&app.secret);
        }
        self.fallback_secret
            .as_ref()
            .ok_or(TokenError::MissingKey(app.id))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(user, app, ttl, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        app_id::AppId, email::Email, user_id::UserId, user_password::UserPassword,
    };
    use jsonwebtoken::{DecodingKey, Validation};
    use platform::password::{Argon2Hasher, ClearTextPassword};

    fn user() -> User {
        let hasher = Argon2Hasher::new(1, None).unwrap();
        let hash = hasher
            .hash(&ClearTextPassword::new("S3cret!".to_string()))
            .unwrap();
        User::new(
            UserId::new(1),
            Email::from_db("alice@example.com"),
            UserPassword::from(hash),
        )
    }

    fn decode(token: &str, secret: &[u8]) -> jsonwebtoken::errors::Result<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        jsonwebtoken::decode::<TokenClaims>(token, &DecodingKey::from_secret(secret), &validation)
            .map(|data| data.claims)
    }

    #[test]
    fn test_token_signed_with_app_secret() {
        let app = App::new(AppId::new(7), "billing", AppSecret::new("billing-key"));
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let token = JwtTokenIssuer::new()
            .issue_at(&user(), &app, Duration::from_secs(3600), issued_at)
            .unwrap();

        let claims = decode(&token, b"billing-key").unwrap();
        assert_eq!(claims.uid, 1);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.app_id, 7);
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_003_600);
    }

    #[test]
    fn test_token_rejected_under_other_app_key() {
        let app = App::new(AppId::new(7), "billing", AppSecret::new("billing-key"));
        let token = JwtTokenIssuer::new()
            .issue(&user(), &app, Duration::from_secs(60))
            .unwrap();

        assert!(decode(&token, b"crm-key").is_err());
    }

    #[test]
    fn test_same_inputs_same_token() {
        let app = App::new(AppId::new(7), "billing", AppSecret::new("billing-key"));
        let user = user();
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let issuer = JwtTokenIssuer::new();

        let a = issuer.issue_at(&user, &app, Duration::from_secs(60), issued_at).unwrap();
        let b = issuer.issue_at(&user, &app, Duration::from_secs(60), issued_at).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_secret_uses_fallback() {
        let app = App::new(AppId::new(3), "legacy", AppSecret::empty());
        let issuer = JwtTokenIssuer::new().with_fallback_secret(AppSecret::new("service-key"));

        let token = issuer.issue(&user(), &app, Duration::from_secs(60)).unwrap();

        assert_eq!(decode(&token, b"service-key").unwrap().app_id, 3);
    }

    #[test]
    fn test_empty_secret_without_fallback() {
        let app = App::new(AppId::new(3), "legacy", AppSecret::empty());
        let issuer = JwtTokenIssuer::new().with_fallback_secret(AppSecret::empty());

        let result = issuer.issue(&user(), &app, Duration::from_secs(60));

        assert!(matches!(result, Err(TokenError::MissingKey(id)) if id == AppId::new(3)));
    }
}
