//! Bearer token port. Tokens are minted elsewhere; this service only needs to
//! trust them and read the caller's roles.

/// Role allowed to create posts and authors.
pub const ADMIN_ROLE: &str = "admin";

/// Verified content of a bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub subject: String,
    pub roles: Vec<String>,
    /// Expiry, in seconds since the epoch.
    pub exp: i64,
}

impl TokenClaims {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|granted| granted == role)
    }
}

pub trait TokenService: Send + Sync {
    /// Sign a token for `subject`. Used by tests and operator tooling.
    fn generate_token(&self, subject: &str, roles: Vec<String>) -> Result<String, AuthError>;

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no bearer token supplied")]
    MissingAuth,

    #[error("bearer token expired")]
    TokenExpired,

    #[error("bearer token rejected: {0}")]
    InvalidToken(String),

    #[error("caller lacks the required role")]
    InsufficientPermissions,
}
