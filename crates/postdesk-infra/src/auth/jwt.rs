//! HS256 bearer tokens carrying a subject and its roles.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use postdesk_core::ports::{AuthError, TokenClaims, TokenService};

const DEV_SECRET: &str = "postdesk-dev-secret";

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            expiration_hours: 24,
            issuer: "postdesk-api".to_string(),
        }
    }
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_ISSUER` and `JWT_EXPIRATION_HOURS`, keeping
    /// the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.secret = secret;
        }
        if let Ok(issuer) = std::env::var("JWT_ISSUER") {
            config.issuer = issuer;
        }
        if let Some(hours) = std::env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|raw| raw.parse().ok())
        {
            config.expiration_hours = hours;
        }
        config
    }

    /// True while the built-in development secret is in use.
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEV_SECRET
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PostdeskClaims {
    sub: String,
    #[serde(default)]
    roles: Vec<String>,
    iat: i64,
    exp: i64,
    iss: String,
}

impl From<PostdeskClaims> for TokenClaims {
    fn from(claims: PostdeskClaims) -> Self {
        Self {
            subject: claims.sub,
            roles: claims.roles,
            exp: claims.exp,
        }
    }
}

fn rejection(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidIssuer => AuthError::InvalidToken("Unexpected token issuer".to_string()),
        _ => AuthError::InvalidToken(err.to_string()),
    }
}

pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            config,
        }
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, subject: &str, roles: Vec<String>) -> Result<String, AuthError> {
        let issued_at = Utc::now();
        let claims = PostdeskClaims {
            sub: subject.to_owned(),
            roles,
            iat: issued_at.timestamp(),
            exp: (issued_at + TimeDelta::hours(self.config.expiration_hours)).timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        decode::<PostdeskClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.into())
            .map_err(rejection)
    }
}
