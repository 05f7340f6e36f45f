//! Bearer authentication for the restricted post and author writes.

use std::fmt;
use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};

use postdesk_core::ports::{ADMIN_ROLE, AuthError, TokenClaims, TokenService};
use postdesk_shared::ErrorResponse;

/// Who is calling, as asserted by a verified token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject: String,
    pub roles: Vec<String>,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ADMIN_ROLE)
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            subject: claims.subject,
            roles: claims.roles,
        }
    }
}

#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match &self.0 {
            AuthError::MissingAuth => ErrorResponse::unauthorized()
                .with_detail("An `Authorization: Bearer <token>` header is required."),
            AuthError::TokenExpired => {
                ErrorResponse::unauthorized().with_detail("The bearer token has expired.")
            }
            AuthError::InvalidToken(reason) => ErrorResponse::unauthorized()
                .with_detail(format!("The bearer token was rejected: {reason}")),
            AuthError::InsufficientPermissions => {
                ErrorResponse::forbidden().with_detail("Only administrators may do this.")
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// The token part of an `Authorization: Bearer <token>` header.
fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken("header is not ASCII".to_string()))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(token.trim())
        }
        _ => Err(AuthError::InvalidToken("expected a Bearer token".to_string())),
    }
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AuthError> {
    let tokens = req
        .app_data::<web::Data<Arc<dyn TokenService>>>()
        .ok_or_else(|| {
            tracing::error!("No TokenService registered in app data");
            AuthError::InvalidToken("token verification is unavailable".to_string())
        })?;

    tokens.validate_token(bearer_token(req)?).map(Identity::from)
}

/// Extractor for handlers restricted to administrators.
///
/// Put it before any `web::Json` argument: actix runs extractors in order,
/// so a caller without the role is refused before the body is looked at.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub Identity);

impl FromRequest for AdminIdentity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let admin = authenticate(req).and_then(|identity| {
            if identity.is_admin() {
                Ok(AdminIdentity(identity))
            } else {
                tracing::warn!(subject = %identity.subject, path = %req.path(), "Non-admin write refused");
                Err(AuthError::InsufficientPermissions)
            }
        });

        ready(admin.map_err(AuthenticationError))
    }
}
