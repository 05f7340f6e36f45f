//! Mapping of every handler failure onto an RFC 7807 problem response.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use validator::ValidationErrors;

use postdesk_core::error::{DomainError, RepoError};
use postdesk_shared::{ErrorResponse, Violation};

#[derive(Debug)]
pub enum AppError {
    /// 404 for an unknown post or author id.
    NotFound(String),
    /// 400 for malformed JSON, query strings or paging.
    BadRequest(String),
    /// 409 when the store refuses a write on a constraint.
    Conflict(String),
    /// 500; the detail is logged, never returned.
    Internal(String),
    /// 422 carrying one entry per rejected field.
    Validation(Vec<Violation>),
}

pub type AppResult<T> = Result<T, AppError>;

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(what) => write!(f, "{what} not found"),
            AppError::BadRequest(why) => write!(f, "malformed request: {why}"),
            AppError::Conflict(why) => write!(f, "write conflict: {why}"),
            AppError::Internal(why) => write!(f, "internal failure: {why}"),
            AppError::Validation(violations) => {
                write!(f, "{} invalid field(s)", violations.len())
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let problem = match self {
            AppError::NotFound(what) => ErrorResponse::not_found(format!("{what} not found")),
            AppError::BadRequest(why) => ErrorResponse::bad_request(why.as_str()),
            AppError::Conflict(why) => ErrorResponse::new(409, "Conflict").with_detail(why.as_str()),
            AppError::Internal(why) => {
                tracing::error!(error = %why, "Request failed");
                ErrorResponse::internal_error()
            }
            AppError::Validation(violations) => {
                let detail = violations
                    .iter()
                    .map(|v| format!("{}: {}", v.property_path, v.message))
                    .collect::<Vec<_>>()
                    .join("\n");
                ErrorResponse::new(422, "Validation Failed")
                    .with_detail(detail)
                    .with_violations(violations.clone())
            }
        };

        HttpResponse::build(self.status_code()).json(problem)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{entity_type} {id}"))
            }
            DomainError::UnknownStatus(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Record".to_string()),
            RepoError::Constraint(why) => AppError::Conflict(why),
            RepoError::Connection(why) | RepoError::Query(why) => AppError::Internal(why),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let violations = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                let path = property_path(&field);
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    Violation::new(path.clone(), message)
                })
            })
            .collect();

        AppError::Validation(violations)
    }
}

/// Field name as exposed on the wire (`published_at` -> `publishedAt`).
fn property_path(field: &str) -> String {
    let mut path = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            path.extend(c.to_uppercase());
            upper_next = false;
        } else {
            path.push(c);
        }
    }
    path
}
