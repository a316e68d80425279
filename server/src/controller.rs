pub use todo::TodoController;
pub use user::UserController;

mod todo;
mod user;
