use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
    QuerySelect,
};

use crate::{
    entity,
    error::{RepositoryError, RepositoryResult},
    models::User,
    repository::UserRepository,
};

/// PostgreSQL-backed [`UserRepository`] over the `users` table.
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, name: String, date_of_birth: NaiveDate) -> RepositoryResult<User> {
        // created_at/updated_at are left to the column defaults
        let active_model = entity::ActiveModel {
            name: Set(name),
            date_of_birth: Set(date_of_birth),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> RepositoryResult<User> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into)
            .ok_or(RepositoryError::NotFound)
    }

    async fn list(&self, limit: u64, offset: u64) -> RepositoryResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        id: i32,
        name: String,
        date_of_birth: NaiveDate,
    ) -> RepositoryResult<User> {
        let active_model = entity::ActiveModel {
            id: Unchanged(id),
            name: Set(name),
            date_of_birth: Set(date_of_birth),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = match active_model.update(&self.db).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => return Err(RepositoryError::NotFound),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = id, "Updated user");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> RepositoryResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(user_id = id, "Deleted user");
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(entity::Entity::find().count(&self.db).await?)
    }
}
