//! Turn the raw bytes of a request body into a [`JsonMap`].
use bytes::Bytes;
use serde_json::Value;

use crate::media_type::JsonMap;

/// The key used to store a deserialized value that isn't a map.
///
/// E.g. a JSON body containing `[1, 2, 3]` is deserialized as `{ "_json": [1, 2, 3] }`.
pub const SCALAR_KEY: &str = "_json";

/// Decode a request body in a certain format.
///
/// The trait is implemented for all closures with a compatible signature,
/// so you'll rarely need to implement it by hand.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use request_params::{DeserializeError, Deserializer, JsonMap};
///
/// let plain_text = |body: &Bytes| -> Result<JsonMap, DeserializeError> {
///     let text = std::str::from_utf8(body).map_err(|e| DeserializeError::format("text", e))?;
///     let mut map = JsonMap::new();
///     map.insert("text".into(), text.into());
///     Ok(map)
/// };
/// let map = plain_text.deserialize(&Bytes::from_static(b"hello")).unwrap();
/// assert_eq!(map["text"], "hello");
/// ```
pub trait Deserializer: Send + Sync {
    fn deserialize(&self, body: &Bytes) -> Result<JsonMap, DeserializeError>;
}

impl<F> Deserializer for F
where
    F: Fn(&Bytes) -> Result<JsonMap, DeserializeError> + Send + Sync,
{
    fn deserialize(&self, body: &Bytes) -> Result<JsonMap, DeserializeError> {
        (self)(body)
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned by a [`Deserializer`].
pub enum DeserializeError {
    /// The body is not well-formed for the format the deserializer expects.
    #[error("The body is not valid {format}")]
    Format {
        /// The name of the expected format, e.g. `json`.
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Something else went wrong.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DeserializeError {
    /// The body is not well-formed according to `format`.
    pub fn format<E>(format: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Format {
            format: format.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// The built-in deserializer for JSON bodies.
///
/// - An empty body, as well as `null`, is deserialized as an empty map.
/// - A JSON object is returned as is.
/// - Any other JSON value is stored under [`SCALAR_KEY`].
pub struct JsonDeserializer;

impl Deserializer for JsonDeserializer {
    fn deserialize(&self, body: &Bytes) -> Result<JsonMap, DeserializeError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonMap::new());
        }
        let value: Value =
            serde_json::from_slice(body).map_err(|e| DeserializeError::format("json", e))?;
        Ok(wrap_scalar(value))
    }
}

/// Convert a deserialized value into a map.
///
/// `null` becomes an empty map, objects are returned unchanged, everything else
/// is stored under [`SCALAR_KEY`].
pub fn wrap_scalar(value: Value) -> JsonMap {
    match value {
        Value::Null => JsonMap::new(),
        Value::Object(map) => map,
        other => {
            let mut map = JsonMap::new();
            map.insert(SCALAR_KEY.to_owned(), other);
            map
        }
    }
}
