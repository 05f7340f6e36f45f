//! Domain entities - the core business objects.

mod author;
mod post;

use chrono::{DateTime, Utc};

pub use author::{Author, AuthorId};
pub use post::{Post, PostStatus};

/// Hook run by a repository immediately before an entity is written.
///
/// Every `save` path calls this exactly once per write, with the write time.
/// Nothing else should call it.
pub trait PreFlush {
    fn pre_flush(&mut self, now: DateTime<Utc>);
}
