use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use todo::Todo;
pub use user::User;

pub mod todo;
pub mod user;

pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Body returned with every failed request.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// Falls back to [`DEFAULT_ERROR_MESSAGE`] when `message` is empty.
    pub fn new<T>(message: T) -> Self
    where
        T: Into<String>,
    {
        let error = message.into();
        if error.trim().is_empty() {
            Self::default()
        } else {
            Self { error }
        }
    }
}

impl Default for ErrorBody {
    fn default() -> Self {
        Self {
            error: DEFAULT_ERROR_MESSAGE.to_owned(),
        }
    }
}

/// Treats an empty string the same as a missing one. Whitespace is a value.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Deserializes a request body that must be a JSON object. Arrays are refused,
/// derived struct visitors would otherwise read them by position.
fn from_object_body<T>(body: Value) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned,
{
    let fields: Map<String, Value> = serde_json::from_value(body)?;
    serde_json::from_value(Value::Object(fields))
}

fn invalid_body_serde_message(err: &serde_json::Error) -> String {
    format!("invalid format of request body: '{}'", err)
}
