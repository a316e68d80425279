use crate::{Database, DatabaseError, DatabaseResult, Todo};
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub todos: Vec<Todo>,
}

impl User {
    fn new(name: String, username: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            username,
            todos: Vec::new(),
        }
    }

    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
        }
    }
}

/// A registered user without their todos, as resolved for each request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct UserIdentity {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

/// The set of registered users, keyed by username.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Registers a new user with an empty todo list.
    ///
    /// Fails if `name` or `username` is empty, or if `username` is already taken.
    async fn register(&self, name: &str, username: &str) -> DatabaseResult<User>;

    /// Exact, case-sensitive lookup. An empty `username` never matches.
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<UserIdentity>>;

    /// All users in registration order.
    async fn list_users(&self) -> DatabaseResult<Vec<User>>;
}

#[async_trait]
impl UserDirectory for Database {
    async fn register(&self, name: &str, username: &str) -> DatabaseResult<User> {
        if name.is_empty() || username.is_empty() {
            return Err(DatabaseError::InvalidInput(
                "Name and Username are required".to_string(),
            ));
        }

        let mut users = self.write().await;

        if users.iter().any(|u| u.username == username) {
            return Err(DatabaseError::AlreadyExists {
                username: username.to_string(),
            });
        }

        let user = User::new(name.to_string(), username.to_string());
        users.push(user.clone());
        info!("registered user '{}' with id {}", user.username, user.id);

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<UserIdentity>> {
        if username.is_empty() {
            return Ok(None);
        }

        let users = self.read().await;
        let mut matching: Vec<_> = users.iter().filter(|u| u.username == username).collect();

        if matching.is_empty() {
            Ok(None)
        } else if matching.len() > 1 {
            error!(r#"more than 1 user with username: "{}""#, username);
            Ok(None)
        } else {
            Ok(Some(matching.swap_remove(0).identity()))
        }
    }

    async fn list_users(&self) -> DatabaseResult<Vec<User>> {
        Ok(self.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TodoCollection;

    #[tokio::test]
    async fn register_test() {
        let db = Database::new();

        let user = db.register("Ann", "ann").await.unwrap();

        assert_eq!(user.name, "Ann");
        assert_eq!(user.username, "ann");
        assert!(user.todos.is_empty());
        assert_eq!(db.list_users().await.unwrap(), vec![user]);
    }

    #[tokio::test]
    async fn register_duplicate_username_test() {
        let db = Database::new();
        db.register("Ann", "ann").await.unwrap();

        let result = db.register("Another Ann", "ann").await;

        assert_eq!(
            result,
            Err(DatabaseError::AlreadyExists {
                username: "ann".to_string()
            })
        );
        assert_eq!(db.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn register_missing_fields_test() {
        let db = Database::new();

        for (name, username) in [("", "ann"), ("Ann", ""), ("", "")].iter() {
            let result = db.register(name, username).await;
            assert!(matches!(result, Err(DatabaseError::InvalidInput(_))));
        }
        assert!(db.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_are_unique_test() {
        let db = Database::new();

        let ann = db.register("Ann", "ann").await.unwrap();
        let bob = db.register("Bob", "bob").await.unwrap();

        assert_ne!(ann.id, bob.id);
    }

    #[tokio::test]
    async fn find_by_username_test() {
        let db = Database::new();
        let ann = db.register("Ann", "ann").await.unwrap();

        assert_eq!(db.find_by_username("ann").await.unwrap(), Some(ann.identity()));
        assert_eq!(db.find_by_username("Ann").await.unwrap(), None);
        assert_eq!(db.find_by_username("bob").await.unwrap(), None);
        assert_eq!(db.find_by_username("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn find_by_username_leaves_todos_behind_test() {
        let db = Database::new();
        let ann = db.register("Ann", "ann").await.unwrap().identity();
        db.insert_todo(&ann, "Buy milk", "2030-01-01").await.unwrap();

        let found = db.find_by_username("ann").await.unwrap().unwrap();

        assert_eq!(found, ann);
        assert_eq!(db.list_todos(&found).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn whitespace_is_a_value_test() {
        let db = Database::new();

        let user = db.register(" ", "ann").await.unwrap();

        assert_eq!(user.name, " ");
        assert_eq!(db.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_register_same_username_test() {
        let db = Database::new();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let db = db.clone();
                tokio::spawn(async move { db.register(&format!("Ann {}", i), "ann").await })
            })
            .collect();

        let mut registered = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => registered += 1,
                Err(error) => assert_eq!(
                    error,
                    DatabaseError::AlreadyExists {
                        username: "ann".to_string()
                    }
                ),
            }
        }

        assert_eq!(registered, 1);
        assert_eq!(db.list_users().await.unwrap().len(), 1);
    }
}
