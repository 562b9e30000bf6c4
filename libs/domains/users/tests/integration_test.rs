//! Integration tests for Users domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - The migration creates a schema the entity can read and write
//! - Database defaults fill in timestamps
//! - Not-found detection works for update and delete
//!
//! Run with `cargo test -p domain_users -- --ignored` (requires Docker).

use domain_users::*;
use test_utils::{TestDatabase, TestDataBuilder};

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_user() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let created = repo
        .create(builder.name("main"), builder.date_of_birth())
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.name, builder.name("main"));
    assert_eq!(created.date_of_birth, builder.date_of_birth());

    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_refreshes_updated_at() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_refreshes");

    let created = repo
        .create(builder.name("before"), builder.date_of_birth())
        .await
        .unwrap();

    let updated = repo
        .update(created.id, builder.name("after"), created.date_of_birth)
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, builder.name("after"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_missing_rows_are_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("missing_rows");

    assert!(matches!(
        repo.get_by_id(999_999).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.update(999_999, builder.name("x"), builder.date_of_birth())
            .await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete(999_999).await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_pages_and_count() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("list_pages");

    for i in 0..12 {
        service
            .create_user(CreateUserRequest {
                name: builder.name(&i.to_string()),
                date_of_birth: builder.date_of_birth(),
            })
            .await
            .unwrap();
    }

    let page = service.list_users(2, 5).await.unwrap();
    let ids: Vec<i32> = page.users.iter().map(|u| u.id).collect();

    assert_eq!(ids, vec![6, 7, 8, 9, 10]);
    assert_eq!(page.total_count, 12);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_twice() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("delete_twice");

    let user = service
        .create_user(CreateUserRequest {
            name: builder.name("main"),
            date_of_birth: builder.date_of_birth(),
        })
        .await
        .unwrap();

    service.delete_user(user.id).await.unwrap();
    assert!(matches!(
        service.delete_user(user.id).await,
        Err(UserError::NotFound)
    ));
}
