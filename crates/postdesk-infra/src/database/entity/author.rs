//! Author entity for SeaORM.

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use postdesk_core::domain::{Author, AuthorId};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Author {
    fn from(model: Model) -> Self {
        Self {
            id: Some(AuthorId(model.id)),
            name: model.name,
        }
    }
}

impl From<Author> for ActiveModel {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.map_or(NotSet, |id| Set(id.into())),
            name: Set(author.name),
        }
    }
}
