use crate::Todo;
use uuid::Uuid;

pub mod add_user;

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub todos: Vec<Todo>,
}

impl User {
    pub fn new(id: Uuid, name: String, username: String, todos: Vec<Todo>) -> Self {
        Self {
            id,
            name,
            username,
            todos,
        }
    }
}
