use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUserRequest, PaginatedUsers, UpdateUserRequest, User};
use crate::repository::UserRepository;

/// Service layer for User business logic
///
/// Requests are expected to be validated by the handler. This is the only
/// place where [`crate::error::RepositoryError`] becomes [`UserError`].
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user
    pub async fn create_user(&self, input: CreateUserRequest) -> UserResult<User> {
        self.repository
            .create(input.name, input.date_of_birth)
            .await
            .map_err(UserError::Internal)
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, id: i32) -> UserResult<User> {
        Ok(self.repository.get_by_id(id).await?)
    }

    /// List one page of users with the total count
    ///
    /// `page` and `page_size` below 1 are raised to 1; there is no upper bound.
    pub async fn list_users(&self, page: i64, page_size: i64) -> UserResult<PaginatedUsers> {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let offset = (page - 1).saturating_mul(page_size);

        let (users, total_count) = tokio::try_join!(
            self.repository
                .list(page_size.unsigned_abs(), offset.unsigned_abs()),
            self.repository.count(),
        )
        .map_err(UserError::Internal)?;

        tracing::debug!(page, page_size, total_count, "Listed users");

        Ok(PaginatedUsers {
            users,
            total_count,
            page,
            page_size,
        })
    }

    /// Replace a user's name and date of birth
    pub async fn update_user(&self, id: i32, input: UpdateUserRequest) -> UserResult<User> {
        Ok(self
            .repository
            .update(id, input.name, input.date_of_birth)
            .await?)
    }

    /// Delete a user
    pub async fn delete_user(&self, id: i32) -> UserResult<()> {
        Ok(self.repository.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1815, 12, 10).unwrap()
    }

    fn db_error() -> RepositoryError {
        RepositoryError::Database(DbErr::Custom("connection reset".into()))
    }

    fn create_request(name: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            date_of_birth: dob(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let service = UserService::new(InMemoryUserRepository::new());

        let created = service
            .create_user(create_request("Ada Lovelace"))
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.name, "Ada Lovelace");
        assert_eq!(created.date_of_birth, dob());

        let fetched = service.get_user_by_id(created.id).await.unwrap();
        assert_eq!(fetched.name, created.name);
        assert_eq!(fetched.date_of_birth, created.date_of_birth);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_everywhere() {
        let service = UserService::new(InMemoryUserRepository::new());
        let update = UpdateUserRequest {
            name: "x".into(),
            date_of_birth: dob(),
        };

        assert!(matches!(
            service.get_user_by_id(999_999).await,
            Err(UserError::NotFound)
        ));
        assert!(matches!(
            service.update_user(999_999, update).await,
            Err(UserError::NotFound)
        ));
        assert!(matches!(
            service.delete_user(999_999).await,
            Err(UserError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_twice_second_is_not_found() {
        let service = UserService::new(InMemoryUserRepository::new());
        let user = service.create_user(create_request("Ada")).await.unwrap();

        service.delete_user(user.id).await.unwrap();
        for _ in 0..2 {
            assert!(matches!(
                service.delete_user(user.id).await,
                Err(UserError::NotFound)
            ));
        }
    }

    #[tokio::test]
    async fn test_list_second_page_of_twelve() {
        let service = UserService::new(InMemoryUserRepository::new());
        for i in 1..=12 {
            service
                .create_user(create_request(&format!("user-{i}")))
                .await
                .unwrap();
        }

        let page = service.list_users(2, 5).await.unwrap();
        let ids: Vec<i32> = page.users.iter().map(|u| u.id).collect();

        assert_eq!(ids, vec![6, 7, 8, 9, 10]);
        assert_eq!(page.total_count, 12);
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 5);
    }

    #[tokio::test]
    async fn test_list_computes_offset_from_page() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .with(eq(20), eq(40))
            .times(1)
            .returning(|_, _| Ok(vec![]));
        repo.expect_count().times(1).returning(|| Ok(0));

        let page = UserService::new(repo).list_users(3, 20).await.unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.page_size, 20);
    }

    #[tokio::test]
    async fn test_list_normalizes_non_positive_values() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .with(eq(1), eq(0))
            .times(1)
            .returning(|_, _| Ok(vec![]));
        repo.expect_count().returning(|| Ok(0));

        let page = UserService::new(repo).list_users(0, -7).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
    }

    #[tokio::test]
    async fn test_list_offset_saturates_instead_of_overflowing() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .with(eq(i64::MAX as u64), eq(i64::MAX as u64))
            .returning(|_, _| Ok(vec![]));
        repo.expect_count().returning(|| Ok(3));

        let page = UserService::new(repo)
            .list_users(i64::MAX, i64::MAX)
            .await
            .unwrap();
        assert_eq!(page.total_count, 3);
    }

    #[tokio::test]
    async fn test_list_count_failure_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|_, _| Ok(vec![]));
        repo.expect_count().returning(|| Err(db_error()));

        assert!(matches!(
            UserService::new(repo).list_users(1, 10).await,
            Err(UserError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_create_failure_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .with(eq("Ada".to_string()), eq(dob()))
            .returning(|_, _| Err(db_error()));

        assert!(matches!(
            UserService::new(repo).create_user(create_request("Ada")).await,
            Err(UserError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_get_storage_failure_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(7))
            .returning(|_| Err(db_error()));

        assert!(matches!(
            UserService::new(repo).get_user_by_id(7).await,
            Err(UserError::Internal(RepositoryError::Database(_)))
        ));
    }

    #[tokio::test]
    async fn test_update_passes_fields_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .with(eq(3), eq("Ada King".to_string()), eq(dob()))
            .returning(|id, name, date_of_birth| {
                Ok(User {
                    id,
                    name,
                    date_of_birth,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let user = UserService::new(repo)
            .update_user(
                3,
                UpdateUserRequest {
                    name: "Ada King".into(),
                    date_of_birth: dob(),
                },
            )
            .await
            .unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(user.name, "Ada King");
    }

    #[tokio::test]
    async fn test_delete_storage_failure_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().returning(|_| Err(db_error()));

        assert!(matches!(
            UserService::new(repo).delete_user(1).await,
            Err(UserError::Internal(_))
        ));
    }
}
