use std::ops::Deref;

use serde_json::Value;

use crate::media_type::JsonMap;
use crate::request::path::PathParams;

/// The parameters of an incoming request: its deserialized body
/// merged with its route parameters.
///
/// Route parameters win over body fields with the same name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RequestParams(JsonMap);

impl RequestParams {
    pub fn new(map: JsonMap) -> Self {
        Self(map)
    }

    /// Insert every route parameter as a JSON string, overriding
    /// existing keys.
    pub(crate) fn merge_path_params(&mut self, path_params: &PathParams) {
        for (key, value) in path_params.iter() {
            self.0.insert(key.to_owned(), Value::String(value.to_owned()));
        }
    }

    /// Deserialize the parameters into a strongly-typed value.
    pub fn to_typed<T>(&self) -> Result<T, serde_json::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_value(Value::Object(self.0.clone()))
    }

    pub fn into_inner(self) -> JsonMap {
        self.0
    }
}

impl Deref for RequestParams {
    type Target = JsonMap;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<JsonMap> for RequestParams {
    fn from(map: JsonMap) -> Self {
        Self(map)
    }
}

impl From<RequestParams> for Value {
    fn from(params: RequestParams) -> Self {
        Value::Object(params.0)
    }
}
