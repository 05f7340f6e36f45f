//! Application state - shared across all handlers.

use std::sync::Arc;

use postdesk_core::ports::{AuthorRepository, PostRepository};
use postdesk_infra::{DatabaseConfig, InMemoryAuthorRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use postdesk_infra::database::{PostgresAuthorRepository, PostgresPostRepository};

/// Which store the repositories write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Postgres,
    Memory,
}

impl Storage {
    pub fn as_str(self) -> &'static str {
        match self {
            Storage::Postgres => "postgres",
            Storage::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    pub storage: Storage,
}

impl AppState {
    /// Repositories over Postgres when it is configured and reachable,
    /// otherwise over process memory.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set, posts are kept in memory");
            return Self::in_memory();
        };

        #[cfg(feature = "postgres")]
        match config.connect().await {
            Ok(db) => Self {
                posts: Arc::new(PostgresPostRepository::new(db.clone())),
                authors: Arc::new(PostgresAuthorRepository::new(db)),
                storage: Storage::Postgres,
            },
            Err(e) => {
                tracing::error!(error = %e, "Post store unreachable, falling back to memory");
                Self::in_memory()
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            tracing::warn!(
                url = %config.url,
                "Built without the postgres feature, ignoring DATABASE_URL"
            );
            Self::in_memory()
        }
    }

    /// State backed by process-local repositories.
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            authors: Arc::new(InMemoryAuthorRepository::new()),
            storage: Storage::Memory,
        }
    }
}
