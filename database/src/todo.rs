use crate::{Database, DatabaseError, DatabaseResult, User, UserIdentity};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use uuid::Uuid;

const NAIVE_DATE_TIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub done: bool,
    pub deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    fn new(title: String, deadline: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            done: false,
            deadline,
            created_at: Utc::now(),
        }
    }
}

/// Parses a caller supplied deadline.
///
/// Accepts RFC 3339 timestamps, naive date-times (read as UTC) and bare dates
/// (midnight UTC).
pub fn parse_deadline(input: &str) -> DatabaseResult<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
        return Ok(with_offset.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS.iter() {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| DatabaseError::InvalidInput(format!("invalid deadline '{}'", input)))
}

/// The todos of a single, already resolved, user.
#[async_trait]
pub trait TodoCollection: Send + Sync {
    /// The user's todos in their current order.
    async fn list_todos(&self, user: &UserIdentity) -> DatabaseResult<Vec<Todo>>;

    async fn insert_todo(&self, user: &UserIdentity, title: &str, deadline: &str) -> DatabaseResult<Todo>;

    /// Replaces title and deadline, keeping `done`, `created_at` and the position in the list.
    async fn update_todo(
        &self,
        user: &UserIdentity,
        id: &str,
        title: &str,
        deadline: &str,
    ) -> DatabaseResult<Todo>;

    /// Sets `done`. Marking an already done todo succeeds again.
    async fn mark_todo_done(&self, user: &UserIdentity, id: &str) -> DatabaseResult<Todo>;

    async fn delete_todo(&self, user: &UserIdentity, id: &str) -> DatabaseResult<()>;
}

#[async_trait]
impl TodoCollection for Database {
    async fn list_todos(&self, user: &UserIdentity) -> DatabaseResult<Vec<Todo>> {
        let users = self.read().await;

        users
            .iter()
            .find(|u| u.id == user.id)
            .map(|u| u.todos.clone())
            .ok_or_else(|| DatabaseError::UserNotFound(user.username.clone()))
    }

    async fn insert_todo(&self, user: &UserIdentity, title: &str, deadline: &str) -> DatabaseResult<Todo> {
        if title.is_empty() || deadline.is_empty() {
            return Err(DatabaseError::InvalidInput(
                "Title and Deadline are required".to_string(),
            ));
        }
        let deadline = parse_deadline(deadline)?;

        self.with_user_mut(user, |stored| {
            let todo = Todo::new(title.to_string(), deadline);
            stored.todos.push(todo.clone());
            info!("user '{}' added todo {}", stored.username, todo.id);
            Ok(todo)
        })
        .await
    }

    async fn update_todo(
        &self,
        user: &UserIdentity,
        id: &str,
        title: &str,
        deadline: &str,
    ) -> DatabaseResult<Todo> {
        if id.is_empty() || title.is_empty() || deadline.is_empty() {
            return Err(invalid_parameters());
        }
        let deadline = parse_deadline(deadline)?;

        self.with_user_mut(user, |stored| {
            let todo = find_todo_mut(stored, id)
                .ok_or_else(|| DatabaseError::TodoNotFound(format!("{} not found", id)))?;
            todo.title = title.to_string();
            todo.deadline = deadline;
            Ok(todo.clone())
        })
        .await
    }

    async fn mark_todo_done(&self, user: &UserIdentity, id: &str) -> DatabaseResult<Todo> {
        if id.is_empty() {
            return Err(invalid_parameters());
        }

        self.with_user_mut(user, |stored| {
            let todo = find_todo_mut(stored, id)
                .ok_or_else(|| DatabaseError::TodoNotFound(format!("{} not found", id)))?;
            todo.done = true;
            Ok(todo.clone())
        })
        .await
    }

    async fn delete_todo(&self, user: &UserIdentity, id: &str) -> DatabaseResult<()> {
        if id.is_empty() {
            return Err(invalid_parameters());
        }

        self.with_user_mut(user, |stored| {
            let position = stored
                .todos
                .iter()
                .position(|t| t.id.to_string() == id)
                .ok_or_else(|| DatabaseError::TodoNotFound("Todo not found".to_string()))?;
            let removed = stored.todos.remove(position);
            info!("user '{}' deleted todo {}", stored.username, removed.id);
            Ok(())
        })
        .await
    }
}

fn invalid_parameters() -> DatabaseError {
    DatabaseError::InvalidInput("Invalid parameters".to_string())
}

/// Ids match only in their canonical lowercase hyphenated form.
fn find_todo_mut<'a>(user: &'a mut User, id: &str) -> Option<&'a mut Todo> {
    user.todos.iter_mut().find(|t| t.id.to_string() == id)
}
