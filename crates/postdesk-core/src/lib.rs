//! # Postdesk Core
//!
//! The domain layer of the Postdesk service.
//! This crate contains the post lifecycle rules with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
