//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Note: Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use postdesk_core::domain::{Author, AuthorId, Post, PreFlush};
use postdesk_core::error::RepoError;
use postdesk_core::ports::{AuthorRepository, BaseRepository, Page, PostFilter, PostRepository};

/// Rows keyed by id, plus the next id to hand out.
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert under a fresh id, or replace an existing row.
    fn upsert(&mut self, id: Option<i32>, assign: impl FnOnce(i32) -> T) -> Result<&T, RepoError> {
        let id = match id {
            Some(id) if self.rows.contains_key(&id) => id,
            Some(_) => return Err(RepoError::NotFound),
            None => self.allocate_id(),
        };
        self.rows.insert(id, assign(id));
        self.rows.get(&id).ok_or(RepoError::NotFound)
    }
}

/// In-memory post repository using an ordered map with async RwLock.
pub struct InMemoryPostRepository {
    table: RwLock<Table<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut post = entity;
        post.pre_flush(Utc::now());

        let mut table = self.table.write().await;
        let saved = table.upsert(post.id(), |id| {
            Post::restore(
                id,
                post.title().to_owned(),
                post.content().to_owned(),
                post.published_at(),
                post.status(),
                post.author(),
            )
        })?;

        Ok(saved.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Post>, RepoError> {
        let table = self.table.read().await;
        let matching: Vec<&Post> = table.rows.values().filter(|p| filter.matches(p)).collect();

        let offset = page.saturating_sub(1).saturating_mul(per_page);
        let items = matching
            .iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(per_page).unwrap_or(usize::MAX))
            .map(|p| (*p).clone())
            .collect();

        Ok(Page {
            items,
            page,
            per_page,
            total_items: matching.len() as u64,
        })
    }
}

/// In-memory author repository.
pub struct InMemoryAuthorRepository {
    table: RwLock<Table<Author>>,
}

impl InMemoryAuthorRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryAuthorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Author, AuthorId> for InMemoryAuthorRepository {
    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id.0).cloned())
    }

    async fn save(&self, entity: Author) -> Result<Author, RepoError> {
        let mut author = entity;
        author.pre_flush(Utc::now());

        let mut table = self.table.write().await;
        let saved = table.upsert(author.id.map(i32::from), |id| Author {
            id: Some(AuthorId(id)),
            name: author.name,
        })?;

        Ok(saved.clone())
    }

    async fn delete(&self, id: AuthorId) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id.0).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

impl AuthorRepository for InMemoryAuthorRepository {}
