//! # Postdesk Shared
//!
//! Wire types of the HTTP API: write DTOs with their validation rules,
//! per-endpoint views, and the standard response envelopes.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, Paginated, Violation};
