//! SeaORM entities backing the domain types.

pub mod author;
pub mod post;
