use crate::app::{AppError, AppResult};
use hyper::Method;

/// A request target understood by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Health check
    Ping,
    /// Register a user
    AddUser,
    /// List the todos of the calling user
    GetTodos,
    /// Add a todo for the calling user
    AddTodo,
    /// Replace title and deadline of a todo
    UpdateTodo(String),
    /// Mark a todo as done
    MarkTodoDone(String),
    /// Delete a todo
    DeleteTodo(String),
}

impl Route {
    /// Resolves a method and path, ignoring trailing slashes.
    ///
    /// Unknown paths give 404, known paths with the wrong method give 405.
    pub fn from_parts(method: &Method, path: &str) -> AppResult<Route> {
        let without_trailing_slash = path.trim_end_matches('/');
        let segments: Vec<&str> = without_trailing_slash.split('/').skip(1).collect();

        match (method, segments.as_slice()) {
            (_, ["ping"]) => Ok(Route::Ping),
            (&Method::POST, ["users"]) => Ok(Route::AddUser),
            (&Method::GET, ["todos"]) => Ok(Route::GetTodos),
            (&Method::POST, ["todos"]) => Ok(Route::AddTodo),
            (&Method::PUT, ["todos", id]) => Ok(Route::UpdateTodo(id.to_string())),
            (&Method::DELETE, ["todos", id]) => Ok(Route::DeleteTodo(id.to_string())),
            (&Method::PATCH, ["todos", id, "done"]) => Ok(Route::MarkTodoDone(id.to_string())),
            (_, ["users"]) | (_, ["todos"]) | (_, ["todos", _]) | (_, ["todos", _, "done"]) => {
                Err(AppError::method_not_allowed())
            }
            _invalid => Err(AppError::not_found().with_message("invalid route")),
        }
    }

    /// Whether the route acts on behalf of a user resolved from the `username` header.
    pub fn requires_user(&self) -> bool {
        !matches!(self, Route::Ping | Route::AddUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    #[test]
    fn todo_routes_test() {
        assert_eq!(
            Route::from_parts(&Method::GET, "/todos").unwrap(),
            Route::GetTodos
        );
        assert_eq!(
            Route::from_parts(&Method::POST, "/todos/").unwrap(),
            Route::AddTodo
        );
        assert_eq!(
            Route::from_parts(&Method::PUT, "/todos/abc").unwrap(),
            Route::UpdateTodo("abc".to_string())
        );
        assert_eq!(
            Route::from_parts(&Method::PATCH, "/todos/abc/done").unwrap(),
            Route::MarkTodoDone("abc".to_string())
        );
        assert_eq!(
            Route::from_parts(&Method::DELETE, "/todos/abc").unwrap(),
            Route::DeleteTodo("abc".to_string())
        );
    }

    #[test]
    fn empty_id_segment_test() {
        assert_eq!(
            Route::from_parts(&Method::PATCH, "/todos//done").unwrap(),
            Route::MarkTodoDone(String::new())
        );
    }

    #[test]
    fn wrong_method_test() {
        let error = Route::from_parts(&Method::GET, "/users").unwrap_err();
        assert_eq!(error.status, StatusCode::METHOD_NOT_ALLOWED);

        let error = Route::from_parts(&Method::POST, "/todos/abc/done").unwrap_err();
        assert_eq!(error.status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn unknown_route_test() {
        for path in ["/", "/api", "/todos/abc/undone", "/users/ann"].iter() {
            let error = Route::from_parts(&Method::GET, path).unwrap_err();
            assert_eq!(error.status, StatusCode::NOT_FOUND);
            assert_eq!(error.message, "invalid route");
        }
    }

    #[test]
    fn requires_user_test() {
        assert!(!Route::AddUser.requires_user());
        assert!(!Route::Ping.requires_user());
        assert!(Route::GetTodos.requires_user());
        assert!(Route::DeleteTodo("abc".to_string()).requires_user());
    }
}
