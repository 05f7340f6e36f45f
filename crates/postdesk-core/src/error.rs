//! Error types shared by the domain and its ports.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} {id} does not exist")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("'{0}' is not a post status")]
    UnknownStatus(String),
}

/// Failures of a repository, whatever store backs it.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("store unreachable: {0}")]
    Connection(String),

    #[error("store query failed: {0}")]
    Query(String),

    #[error("no such record")]
    NotFound,

    #[error("write refused by a constraint: {0}")]
    Constraint(String),
}
