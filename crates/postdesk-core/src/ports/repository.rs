use async_trait::async_trait;

use crate::domain::{Author, AuthorId, Post, PostStatus};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// Implementations must call [`PreFlush::pre_flush`](crate::domain::PreFlush)
/// on the entity right before writing it in `save`.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (insert when it has no ID yet, update otherwise).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Exact-match filters accepted by the post collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        self.status.is_none_or(|status| post.status() == status)
    }
}

/// One page of a collection. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total_items.div_ceil(self.per_page)
    }
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Fetch one page of posts matching `filter`, ordered by ascending id.
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Post>, RepoError>;
}

/// Author repository - the lookup posts resolve their author reference through.
#[async_trait]
pub trait AuthorRepository: BaseRepository<Author, AuthorId> {}
