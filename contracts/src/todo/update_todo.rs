use serde_json::Value;
use std::{
    convert::{TryFrom, TryInto},
    error::Error,
    fmt::Display,
};

/// Body of `PUT /todos/:id`.
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
            InvalidParams::MissingTitleOrDeadline => "Invalid parameters".to_owned(),
        };

        write!(f, "{}", output)
    }
}
