use crate::{
    auth::UsernameAuth,
    controller::{TodoController, UserController},
    route::Route,
};
use contracts::DEFAULT_ERROR_MESSAGE;
use database::{Database, DatabaseError, TodoCollection, UserDirectory};
use hyper::{body::Buf, Body, Request, Response, StatusCode};
use serde_json::Value as JsonValue;
use std::{
    error::Error,
    fmt::{Debug, Display},
    sync::Arc,
};

pub type AppResult<T> = Result<T, AppError>;

pub struct App {
    auth: UsernameAuth,
    user_controller: UserController,
    todo_controller: TodoController,
}

impl App {
    pub fn new(users: Arc<dyn UserDirectory>, todos: Arc<dyn TodoCollection>) -> Self {
        Self {
            auth: UsernameAuth::new(users.clone()),
            user_controller: UserController::new(users),
            todo_controller: TodoController::new(todos),
        }
    }

    /// An app backed by a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        let db = Database::new();
        Self::new(Arc::new(db.clone()), Arc::new(db))
    }

    /// Handle a single routed request
    pub async fn handle_single(
        &self,
        route: Route,
        request: Request<Body>,
    ) -> AppResult<Response<Body>> {
        let user = if route.requires_user() {
            Some(self.auth.authenticate(request.headers()).await?)
        } else {
            None
        };

        match (route, user) {
            (Route::Ping, _) => Ok(crate::ping_pong_response()),
            (Route::AddUser, _) => {
                let body = get_body_as_json(request).await?;
                let user = self.user_controller.add_user(body).await?;
                crate::json_response(&user, StatusCode::CREATED)
            }
            (Route::GetTodos, Some(user)) => {
                let todos = self.todo_controller.get_todos(&user).await?;
                crate::json_response(&todos, StatusCode::OK)
            }
            (Route::AddTodo, Some(user)) => {
                let body = get_body_as_json(request).await?;
                let todo = self.todo_controller.add_todo(&user, body).await?;
                crate::json_response(&todo, StatusCode::CREATED)
            }
            (Route::UpdateTodo(id), Some(user)) => {
                let body = get_body_as_json(request).await?;
                let todo = self.todo_controller.update_todo(&user, &id, body).await?;
                crate::json_response(&todo, StatusCode::OK)
            }
            (Route::MarkTodoDone(id), Some(user)) => {
                let todo = self.todo_controller.mark_todo_done(&user, &id).await?;
                crate::json_response(&todo, StatusCode::OK)
            }
            (Route::DeleteTodo(id), Some(user)) => {
                self.todo_controller.delete_todo(&user, &id).await?;
                Ok(crate::empty_response(StatusCode::NO_CONTENT))
            }
            (route, None) => Err(AppError::internal_error()
                .with_context(&format!("no user resolved for {:?}", route))),
        }
    }
}

/// Attempts to parse the body of a request as json. An empty body reads as `{}`.
async fn get_body_as_json(request: Request<Body>) -> AppResult<JsonValue> {
    let buf = hyper::body::aggregate(request).await?;

    if !buf.has_remaining() {
        return Ok(JsonValue::Object(Default::default()));
    }

    serde_json::from_reader(buf.reader()).map_err(|serde_error| {
        AppError::invalid_input()
            .with_message(&format!("invalid json in request body: '{}'", serde_error))
            .with_context(&serde_error)
    })
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub context: Option<String>,
}

impl AppError {
    fn new(status: StatusCode) -> Self {
        Self {
            status,
            message: DEFAULT_ERROR_MESSAGE.to_owned(),
            context: None,
        }
    }

    pub fn with_context<T>(mut self, value: &T) -> Self
    where
        T: Debug,
    {
        self.context = Some(format!("{:?}", value));
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = message.to_owned();
        self
    }

    pub fn invalid_input() -> Self {
        Self::new(StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED).with_message("method not allowed")
    }

    pub fn internal_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.message)
    }
}

impl Error for AppError {}

impl From<DatabaseError> for AppError {
    fn from(db_error: DatabaseError) -> Self {
        let error = match &db_error {
            DatabaseError::InvalidInput(_) | DatabaseError::AlreadyExists { .. } => {
                AppError::invalid_input()
            }
            DatabaseError::UserNotFound(_) => AppError::unauthorized(),
            DatabaseError::TodoNotFound(_) => AppError::not_found(),
        };

        error.with_message(&db_error.to_string())
    }
}

impl From<hyper::Error> for AppError {
    fn from(e: hyper::Error) -> Self {
        AppError::invalid_input()
            .with_message("failed to read request body")
            .with_context(&e)
    }
}

impl From<hyper::http::Error> for AppError {
    fn from(e: hyper::http::Error) -> Self {
        AppError::internal_error().with_context(&e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::internal_error().with_context(&e)
    }
}

pub trait ParamsError: Error {}

impl<T> From<T> for AppError
where
    T: ParamsError,
{
    fn from(err: T) -> Self {
        AppError::invalid_input()
            .with_message(&err.to_string())
            .with_context(&err)
    }
}
