//! Post entity for SeaORM.

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use postdesk_core::domain::{AuthorId, Post, PostStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(128))")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub status: Status,
    pub author_id: i32,
}

/// Stored form of [`PostStatus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(255))")]
pub enum Status {
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "deleted")]
    Deleted,
}

impl From<PostStatus> for Status {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Published => Status::Published,
            PostStatus::Draft => Status::Draft,
            PostStatus::Deleted => Status::Deleted,
        }
    }
}

impl From<Status> for PostStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Published => PostStatus::Published,
            Status::Draft => PostStatus::Draft,
            Status::Deleted => PostStatus::Deleted,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Author,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Post::restore(
            model.id,
            model.title,
            model.content,
            model.published_at.map(Into::into),
            model.status.into(),
            AuthorId(model.author_id),
        )
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
///
/// A post without an id leaves the key unset so `save` inserts it.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: post.id().map_or(NotSet, Set),
            title: Set(post.title().to_owned()),
            content: Set(post.content().to_owned()),
            published_at: Set(post.published_at().map(Into::into)),
            status: Set(post.status().into()),
            author_id: Set(post.author().into()),
        }
    }
}
