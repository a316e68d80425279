use serde_json::Value;
use std::{
    convert::{TryFrom, TryInto},
    error::Error,
    fmt::Display,
};

/// Body of `POST /todos`. The deadline is kept as sent and parsed by the store.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ParamsBuilder")]
#[non_exhaustive]
pub struct Params {
    pub title: String,
    pub deadline: String,
}

impl Params {
    pub fn new(title: String, deadline: String) -> Result<Self, InvalidParams> {
        let builder = ParamsBuilder {
            title: Some(title),
            deadline: Some(deadline),
        };
        builder.try_into()
    }
}

impl TryFrom<Value> for Params {
    type Error = InvalidParams;

    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let builder: ParamsBuilder =
            crate::from_object_body(body).map_err(InvalidParams::InvalidFormat)?;
        builder.try_into()
    }
}

impl TryFrom<ParamsBuilder> for Params {
    type Error = InvalidParams;

    fn try_from(builder: ParamsBuilder) -> Result<Self, Self::Error> {
        match (crate::present(builder.title), crate::present(builder.deadline)) {
            (Some(title), Some(deadline)) => Ok(Self { title, deadline }),
            _ => Err(InvalidParams::MissingTitleOrDeadline),
        }
    }
}

#[derive(serde::Deserialize)]
struct ParamsBuilder {
    title: Option<String>,
    deadline: Option<String>,
}

#[derive(Debug)]
pub enum InvalidParams {
    InvalidFormat(serde_json::Error),
    MissingTitleOrDeadline,
}

impl Error for InvalidParams {}

impl Display for InvalidParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            InvalidParams::InvalidFormat(serde_error) => {
                crate::invalid_body_serde_message(serde_error)
            }
            InvalidParams::MissingTitleOrDeadline => "Title and Deadline are required".to_owned(),
        };
        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_test() {
        let params =
            Params::try_from(json!({ "title": "Buy milk", "deadline": "2030-01-01" })).unwrap();

        assert_eq!(params.title, "Buy milk");
        assert_eq!(params.deadline, "2030-01-01");
    }

    #[test]
    fn missing_fields_test() {
        for body in vec![
            json!({ "title": "Buy milk" }),
            json!({ "deadline": "2030-01-01" }),
            json!({ "title": "", "deadline": "2030-01-01" }),
        ] {
            let error = Params::try_from(body).unwrap_err();
            assert_eq!(error.to_string(), "Title and Deadline are required");
        }
    }

    #[test]
    fn non_object_body_test() {
        for body in vec![json!("Buy milk"), json!(["Buy milk", "2030-01-01"])] {
            let error = Params::try_from(body).unwrap_err();
            assert!(matches!(error, InvalidParams::InvalidFormat(_)));
        }
    }
}
