use crate::app::{AppResult, ParamsError};
use contracts::{user::add_user, User};
use database::{User as DbUser, UserDirectory};
use serde_json::Value as JsonValue;
use std::{convert::TryFrom, sync::Arc};

use super::todo::TodoWrapper;

pub struct UserController {
    users: Arc<dyn UserDirectory>,
}

impl UserController {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    pub async fn add_user(&self, body: JsonValue) -> AppResult<User> {
        let params = add_user::Params::try_from(body)?;

        let db_user = self.users.register(&params.name, &params.username).await?;

        Ok(UserWrapper::from(db_user).0)
    }
}

impl ParamsError for add_user::InvalidParams {}

/// Used in order to convert from `database::User` to `contracts::User` (orphan rule).
struct UserWrapper(User);

impl From<DbUser> for UserWrapper {
    fn from(value: DbUser) -> Self {
        let todos = value
            .todos
            .into_iter()
            .map(|t| TodoWrapper::from(t).0)
            .collect();
        UserWrapper(User::new(value.id, value.name, value.username, todos))
    }
}
