use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PreFlush;

/// Foreign reference to an author. Posts hold this, never the author itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(pub i32);

impl From<AuthorId> for i32 {
    fn from(id: AuthorId) -> Self {
        id.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Author entity - may be shared by many posts and outlive all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: Option<AuthorId>,
    pub name: String,
}

impl Author {
    /// Create a new, not yet persisted author.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

impl PreFlush for Author {
    fn pre_flush(&mut self, _now: DateTime<Utc>) {}
}
