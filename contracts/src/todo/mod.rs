use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod add_todo;
pub mod update_todo;

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub done: bool,
    pub deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(
        id: Uuid,
        title: String,
        done: bool,
        deadline: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            done,
            deadline,
            created_at,
        }
    }
}
