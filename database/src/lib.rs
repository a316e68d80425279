use std::{fmt::Display, sync::Arc, time};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[macro_use]
extern crate log;

mod todo;
mod user;

pub use todo::*;
pub use user::*;

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Process-wide in-memory store holding every registered user and their todos.
///
/// Cloning is cheap, all clones share the same state. Reads take the shared lock,
/// every mutation holds the exclusive lock for its whole check-then-modify sequence.
#[derive(Clone, Default)]
pub struct Database {
    users: Arc<RwLock<Vec<User>>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    async fn read(&self) -> RwLockReadGuard<'_, Vec<User>> {
        let timer = time::Instant::now();
        let guard = self.users.read().await;
        trace!("acquired read lock in {:?}", timer.elapsed());
        guard
    }

    async fn write(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        let timer = time::Instant::now();
        let guard = self.users.write().await;
        trace!("acquired write lock in {:?}", timer.elapsed());
        guard
    }

    /// Runs `f` against the stored record of `user` while holding the write lock.
    async fn with_user_mut<F, T>(&self, user: &UserIdentity, f: F) -> DatabaseResult<T>
    where
        F: FnOnce(&mut User) -> DatabaseResult<T>,
    {
        let mut users = self.write().await;
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| DatabaseError::UserNotFound(user.username.clone()))?;

        f(stored)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    /// A required value was missing or malformed.
    InvalidInput(String),
    AlreadyExists { username: String },
    UserNotFound(String),
    TodoNotFound(String),
}

impl Display for DatabaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            DatabaseError::InvalidInput(message) => message.clone(),
            DatabaseError::AlreadyExists { username } => {
                format!("Already exists a user with username {}", username)
            }
            DatabaseError::UserNotFound(_) => "User not found".to_string(),
            DatabaseError::TodoNotFound(message) => message.clone(),
        };

        write!(f, "{}", output)
    }
}

impl std::error::Error for DatabaseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_username_message_test() {
        let error = DatabaseError::AlreadyExists {
            username: "ann".to_string(),
        };

        assert_eq!(error.to_string(), "Already exists a user with username ann");
    }

    #[tokio::test]
    async fn clones_share_state_test() {
        let db = Database::new();
        let clone = db.clone();

        db.register("Ann", "ann").await.unwrap();

        assert!(clone.find_by_username("ann").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_user_is_rejected_test() {
        let db = Database::new();
        let other = Database::new();
        let ann = other.register("Ann", "ann").await.unwrap().identity();

        let result = db.list_todos(&ann).await;

        assert_eq!(result, Err(DatabaseError::UserNotFound("ann".to_string())));
    }
}
