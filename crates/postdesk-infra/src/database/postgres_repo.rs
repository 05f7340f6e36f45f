//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use postdesk_core::domain::Post;
use postdesk_core::error::RepoError;
use postdesk_core::ports::{AuthorRepository, Page, PostFilter, PostRepository};

use super::entity::author::Entity as AuthorEntity;
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, read_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL author repository.
pub type PostgresAuthorRepository = PostgresBaseRepository<AuthorEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Post>, RepoError> {
        tracing::debug!(?filter, page, per_page, "Fetching post page");

        let mut query = PostEntity::find().order_by_asc(post::Column::Id);
        if let Some(status) = filter.status {
            query = query.filter(post::Column::Status.eq(post::Status::from(status)));
        }

        let paginator = query.paginate(&self.db, per_page);
        let total_items = paginator
            .num_items()
            .await
            .map_err(read_error)?;
        let models = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(read_error)?;

        Ok(Page {
            items: models.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total_items,
        })
    }
}

impl AuthorRepository for PostgresAuthorRepository {}
