use crate::app::{AppResult, ParamsError};
use contracts::{
    todo::{add_todo, update_todo},
    Todo,
};
use database::{Todo as DbTodo, TodoCollection, UserIdentity};
use serde_json::Value as JsonValue;
use std::{convert::TryFrom, sync::Arc};

pub struct TodoController {
    todos: Arc<dyn TodoCollection>,
}

impl TodoController {
    pub fn new(todos: Arc<dyn TodoCollection>) -> Self {
        Self { todos }
    }

    pub async fn get_todos(&self, user: &UserIdentity) -> AppResult<Vec<Todo>> {
        let todos = self.todos.list_todos(user).await?;

        Ok(todos.into_iter().map(|t| TodoWrapper::from(t).0).collect())
    }

    pub async fn add_todo(&self, user: &UserIdentity, body: JsonValue) -> AppResult<Todo> {
        let params = add_todo::Params::try_from(body)?;

        let todo = self
            .todos
            .insert_todo(user, &params.title, &params.deadline)
            .await?;

        Ok(TodoWrapper::from(todo).0)
    }

    pub async fn update_todo(&self, user: &UserIdentity, id: &str, body: JsonValue) -> AppResult<Todo> {
        let params = update_todo::Params::try_from(body)?;

        info!("updating todo with id '{}'", id);

        let todo = self
            .todos
            .update_todo(user, id, &params.title, &params.deadline)
            .await?;

        Ok(TodoWrapper::from(todo).0)
    }

    pub async fn mark_todo_done(&self, user: &UserIdentity, id: &str) -> AppResult<Todo> {
        let todo = self.todos.mark_todo_done(user, id).await?;

        Ok(TodoWrapper::from(todo).0)
    }

    pub async fn delete_todo(&self, user: &UserIdentity, id: &str) -> AppResult<()> {
        info!("deleting todo with id '{}'", id);

        self.todos.delete_todo(user, id).await?;

        Ok(())
    }
}

impl ParamsError for add_todo::InvalidParams {}
impl ParamsError for update_todo::InvalidParams {}

/// Used in order to convert from `database::Todo` to `contracts::Todo` (orphan rule).
pub(super) struct TodoWrapper(pub(super) Todo);

impl From<DbTodo> for TodoWrapper {
    fn from(value: DbTodo) -> Self {
        TodoWrapper(Todo::new(
            value.id,
            value.title,
            value.done,
            value.deadline,
            value.created_at,
        ))
    }
}
