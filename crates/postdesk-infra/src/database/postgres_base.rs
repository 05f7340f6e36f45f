use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityName, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, TryIntoModel,
};

use postdesk_core::domain::PreFlush;
use postdesk_core::error::RepoError;
use postdesk_core::ports::BaseRepository;

/// Repository over one SeaORM entity. Every save runs the domain flush hook first.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

pub(crate) fn read_error(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

/// Writes additionally surface missing rows and constraint violations.
pub(crate) fn write_error(err: DbErr) -> RepoError {
    if matches!(err, DbErr::RecordNotUpdated) {
        return RepoError::NotFound;
    }

    let err_str = err.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else if err_str.contains("foreign key") {
        RepoError::Constraint("Referenced entity is missing or still in use".to_string())
    } else {
        read_error(err)
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel:
        ActiveModelTrait<Entity = E> + ActiveModelBehavior + TryIntoModel<E::Model> + Send + Sync,
    ID: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType> + Send + Sync + Copy + 'static,
    T: PreFlush + From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let model = E::find_by_id(id).one(&self.db).await.map_err(read_error)?;
        Ok(model.map(T::from))
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        let mut entity = entity;
        entity.pre_flush(Utc::now());
        tracing::debug!(table = E::default().table_name(), "Flushing entity");

        let saved = Into::<E::ActiveModel>::into(entity)
            .save(&self.db)
            .await
            .map_err(write_error)?;

        saved.try_into_model().map(T::from).map_err(read_error)
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let deleted = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        match deleted.rows_affected {
            0 => Err(RepoError::NotFound),
            _ => Ok(()),
        }
    }
}
