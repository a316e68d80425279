use serde_json::Value;
use std::{
    convert::{TryFrom, TryInto},
    error::Error,
    fmt::Display,
};

/// Body of `POST /users`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ParamsBuilder")]
#[non_exhaustive]
pub struct Params {
    pub name: String,
    pub username: String,
}

impl Params {
    pub fn new(name: String, username: String) -> Result<Self, InvalidParams> {
        let builder = ParamsBuilder {
            name: Some(name),
            username: Some(username),
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
        match (crate::present(builder.name), crate::present(builder.username)) {
            (Some(name), Some(username)) => Ok(Self { name, username }),
            _ => Err(InvalidParams::MissingNameOrUsername),
        }
    }
}

#[derive(serde::Deserialize)]
struct ParamsBuilder {
    name: Option<String>,
    username: Option<String>,
}

#[derive(Debug)]
pub enum InvalidParams {
    InvalidFormat(serde_json::Error),
    MissingNameOrUsername,
}

impl Error for InvalidParams {}

impl Display for InvalidParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            InvalidParams::InvalidFormat(serde_error) => {
                crate::invalid_body_serde_message(serde_error)
            }
            InvalidParams::MissingNameOrUsername => "Name and Username are required".to_owned(),
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
        let params = Params::try_from(json!({ "name": "Ann", "username": "ann" })).unwrap();

        assert_eq!(params.name, "Ann");
        assert_eq!(params.username, "ann");
    }

    #[test]
    fn missing_fields_test() {
        for body in vec![
            json!({ "name": "Ann" }),
            json!({ "username": "ann" }),
            json!({ "name": "", "username": "ann" }),
            json!({}),
        ] {
            let error = Params::try_from(body).unwrap_err();
            assert!(matches!(error, InvalidParams::MissingNameOrUsername));
            assert_eq!(error.to_string(), "Name and Username are required");
        }
    }

    #[test]
    fn invalid_format_test() {
        let error = Params::try_from(json!({ "name": 12, "username": "ann" })).unwrap_err();

        assert!(matches!(error, InvalidParams::InvalidFormat(_)));
    }

    #[test]
    fn array_body_test() {
        let error = Params::try_from(json!(["Ann", "ann"])).unwrap_err();

        assert!(matches!(error, InvalidParams::InvalidFormat(_)));
    }

    #[test]
    fn whitespace_name_test() {
        let params = Params::try_from(json!({ "name": " ", "username": "ann" })).unwrap();

        assert_eq!(params.name, " ");
    }
}
