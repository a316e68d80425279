use crate::app::{AppError, AppResult};
use database::{UserDirectory, UserIdentity};
use hyper::HeaderMap;
use std::sync::Arc;

pub const USERNAME_HEADER: &str = "username";

/// Resolves the caller from the `username` header.
///
/// This only checks that the claimed user exists, it does not prove identity.
#[derive(Clone)]
pub struct UsernameAuth {
    users: Arc<dyn UserDirectory>,
}

impl UsernameAuth {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    pub async fn authenticate(&self, headers: &HeaderMap) -> AppResult<UserIdentity> {
        let username = headers
            .get(USERNAME_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                AppError::unauthorized().with_message("Username is required on header")
            })?;

        match self.users.find_by_username(username).await? {
            Some(user) => {
                trace!("resolved user '{}' with id {}", user.username, user.id);
                Ok(user)
            }
            None => Err(AppError::unauthorized()
                .with_message("User not found")
                .with_context(&format!("unknown username '{}'", username))),
        }
    }
}
