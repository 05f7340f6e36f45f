use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::author::AuthorId;
use super::PreFlush;
use crate::error::DomainError;

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Draft,
    Deleted,
}

impl PostStatus {
    /// Every accepted status, in wire form order.
    pub const ALL: [PostStatus; 3] = [PostStatus::Published, PostStatus::Draft, PostStatus::Deleted];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Published => "published",
            PostStatus::Draft => "draft",
            PostStatus::Deleted => "deleted",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownStatus(s.to_owned()))
    }
}

/// Post entity - one content post written by an author.
///
/// Setters return `&mut Self` so a post can be configured in a chain:
/// ```ignore
/// post.set_title("Hello").set_status(PostStatus::Published);
/// ```
/// `published_at` is recomputed from `status` by [`Post::manage_published_at`]
/// right before the post is written to storage, never by the setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: Option<i32>,
    title: String,
    content: String,
    published_at: Option<DateTime<Utc>>,
    status: PostStatus,
    author: AuthorId,
}

impl Post {
    /// Create a new, not yet persisted post.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        status: PostStatus,
        author: AuthorId,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            published_at: None,
            status,
            author,
        }
    }

    /// Rebuild a post that was loaded from storage.
    pub fn restore(
        id: i32,
        title: String,
        content: String,
        published_at: Option<DateTime<Utc>>,
        status: PostStatus,
        author: AuthorId,
    ) -> Self {
        Self {
            id: Some(id),
            title,
            content,
            published_at,
            status,
            author,
        }
    }

    /// Identifier assigned by storage; `None` until the first insert.
    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> &mut Self {
        self.content = content.into();
        self
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    pub fn set_published_at(&mut self, published_at: Option<DateTime<Utc>>) -> &mut Self {
        self.published_at = published_at;
        self
    }

    pub fn status(&self) -> PostStatus {
        self.status
    }

    pub fn set_status(&mut self, status: PostStatus) -> &mut Self {
        self.status = status;
        self
    }

    pub fn author(&self) -> AuthorId {
        self.author
    }

    pub fn set_author(&mut self, author: AuthorId) -> &mut Self {
        self.author = author;
        self
    }

    /// Derive `published_at` from the current status.
    ///
    /// - `published`: always stamped with `now`
    /// - `draft`: stamped with `now` only when unset
    /// - `deleted`: cleared
    pub fn manage_published_at(&mut self, now: DateTime<Utc>) {
        match self.status {
            PostStatus::Published => self.published_at = Some(now),
            PostStatus::Draft => {
                if self.published_at.is_none() {
                    self.published_at = Some(now);
                }
            }
            PostStatus::Deleted => self.published_at = None,
        }
    }
}

impl PreFlush for Post {
    fn pre_flush(&mut self, now: DateTime<Utc>) {
        self.manage_published_at(now);
    }
}
