use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::User;

/// Repository trait for User persistence
///
/// Every call is a single atomic storage operation. Dropping the returned
/// future abandons the round trip.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; storage assigns `id` and timestamps
    async fn create(&self, name: String, date_of_birth: NaiveDate) -> RepositoryResult<User>;

    /// Get a user by ID, `NotFound` when no row matches
    async fn get_by_id(&self, id: i32) -> RepositoryResult<User>;

    /// List users ordered by ascending `id`
    async fn list(&self, limit: u64, offset: u64) -> RepositoryResult<Vec<User>>;

    /// Replace name and date of birth, `NotFound` when no row matches
    async fn update(&self, id: i32, name: String, date_of_birth: NaiveDate)
    -> RepositoryResult<User>;

    /// Hard delete, `NotFound` when no row was removed
    async fn delete(&self, id: i32) -> RepositoryResult<()>;

    /// Count all users
    async fn count(&self) -> RepositoryResult<u64>;
}

#[derive(Debug)]
struct Store {
    users: HashMap<i32, User>,
    next_id: i32,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Ids come from a counter starting at 1 and are never reused, matching a
/// `SERIAL` column.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, name: String, date_of_birth: NaiveDate) -> RepositoryResult<User> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id += 1;

        let now = Utc::now();
        let user = User {
            id,
            name,
            date_of_birth,
            created_at: now,
            updated_at: now,
        };
        store.users.insert(id, user.clone());

        tracing::info!(user_id = id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: i32) -> RepositoryResult<User> {
        let store = self.store.read().await;
        store.users.get(&id).cloned().ok_or(RepositoryError::NotFound)
    }

    async fn list(&self, limit: u64, offset: u64) -> RepositoryResult<Vec<User>> {
        let store = self.store.read().await;

        let mut users: Vec<User> = store.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(users.into_iter().skip(offset).take(limit).collect())
    }

    async fn update(
        &self,
        id: i32,
        name: String,
        date_of_birth: NaiveDate,
    ) -> RepositoryResult<User> {
        let mut store = self.store.write().await;

        let user = store.users.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        user.name = name;
        user.date_of_birth = date_of_birth;
        user.updated_at = Utc::now();

        tracing::info!(user_id = id, "Updated user");
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> RepositoryResult<()> {
        let mut store = self.store.write().await;

        match store.users.remove(&id) {
            Some(_) => {
                tracing::info!(user_id = id, "Deleted user");
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let store = self.store.read().await;
        Ok(store.users.len() as u64)
    }
}
