//! User registry.
//!
//! Users are created once and immutable thereafter.

use crate::errors::BookingError;
use crate::models::User;
use crate::store::MemoryStore;
use tracing::instrument;

/// Repository for user records.
pub struct UserRegistry;

impl UserRegistry {
    /// Register a new user. Fails with `AlreadyExists` if the id is taken.
    #[instrument(skip_all, fields(user_id = %user.user_id))]
    pub async fn create(store: &MemoryStore, user: User) -> Result<User, BookingError> {
        let user_id = user.user_id.clone();
        store
            .users
            .create(&user_id, user)
            .await
            .map_err(|_| BookingError::AlreadyExists(format!("user '{}' already exists", user_id)))
    }

    /// Fetch a user by id.
    pub async fn get(store: &MemoryStore, user_id: &str) -> Result<User, BookingError> {
        store
            .users
            .get(user_id)
            .await
            .ok_or_else(|| BookingError::UserNotFound(format!("user '{}' does not exist", user_id)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::timestamp;
    use chrono::NaiveDateTime;

    fn user(id: &str) -> User {
        User {
            user_id: id.to_string(),
            interested_topics: vec!["rust".to_string()],
            created_at: NaiveDateTime::parse_from_str("2026-08-01 00:00:00", timestamp::FORMAT)
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryStore::new();
        UserRegistry::create(&store, user("alice")).await.unwrap();

        let fetched = UserRegistry::get(&store, "alice").await.unwrap();
        assert_eq!(fetched.user_id, "alice");
    }

    #[tokio::test]
    async fn test_create_duplicate_fails() {
        let store = MemoryStore::new();
        UserRegistry::create(&store, user("alice")).await.unwrap();

        let err = UserRegistry::create(&store, user("alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let store = MemoryStore::new();
        let err = UserRegistry::get(&store, "ghost").await.unwrap_err();
        assert!(matches!(err, BookingError::UserNotFound(_)));
    }
}
