//! # Postdesk Infrastructure
//!
//! Concrete implementations of the ports defined in `postdesk-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//!
//! Without `postgres` only the in-memory repositories are available.

pub mod auth;
pub mod database;

pub use auth::{JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, InMemoryAuthorRepository, InMemoryPostRepository};
