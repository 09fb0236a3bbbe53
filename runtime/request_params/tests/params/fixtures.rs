use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use request_params::{
    Configuration, DeserializeError, Deserializer, JsonMap, MediaTypeDescriptor, Symbol,
    ValidationError,
};
use serde_json::Value;

pub const VENUE_CONTENT_TYPE: &str = "application/vnd.mydomain.venue.v2+json";

/// A venue must have a `name` and a `location`, with numeric coordinates.
#[derive(Debug)]
pub struct Venue;

impl MediaTypeDescriptor for Venue {
    fn suffix(&self) -> Option<Symbol> {
        Some(Symbol::JSON)
    }

    fn validate(&self, value: &JsonMap) -> Result<(), ValidationError> {
        if !value.get("name").is_some_and(Value::is_string) {
            return Err(ValidationError::new("`name` is missing or not a string"));
        }
        let Some(location) = value.get("location").and_then(Value::as_object) else {
            return Err(ValidationError::new("`location` is missing or not an object"));
        };
        for coordinate in ["latitude", "longitude"] {
            if !location.get(coordinate).is_some_and(Value::is_number) {
                return Err(ValidationError::new(format!(
                    "`location.{coordinate}` is missing or not a number"
                )));
            }
        }
        Ok(())
    }
}

/// Venues are registered under the `venue` symbol.
pub fn venue_configuration() -> Configuration {
    Configuration::configure(|c| {
        c.register_content_type(VENUE_CONTENT_TYPE, "venue")
            .lookup_media_type_by_symbol(|symbol| {
                (symbol.as_str() == "venue")
                    .then(|| Arc::new(Venue) as Arc<dyn MediaTypeDescriptor>)
            });
    })
}

/// Decode a base64-encoded text body into `{ "text": <decoded> }`.
pub fn base64_text(body: &Bytes) -> Result<JsonMap, DeserializeError> {
    let decoded = STANDARD
        .decode(body)
        .map_err(|e| DeserializeError::format("base64", e))?;
    let text = String::from_utf8(decoded).map_err(|e| DeserializeError::format("base64", e))?;
    let mut map = JsonMap::new();
    map.insert("text".into(), text.into());
    Ok(map)
}

/// `text/x-base64` bodies are decoded with [`base64_text`].
pub fn base64_configuration() -> Configuration {
    Configuration::configure(|c| {
        c.register_content_type("text/x-base64", "base64")
            .lookup_deserializer_by_symbol(|symbol| {
                (symbol.as_str() == "base64")
                    .then(|| Arc::new(base64_text) as Arc<dyn Deserializer>)
            });
    })
}
