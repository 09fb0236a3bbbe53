/*!
Turn request bodies into structured parameters, driven by their `Content-Type`.

# How does it work?

An API that speaks more than one format (or more than one version of the same format)
has to answer the same question for every request: how should this body be decoded?
The answer depends on the media type declared by the client in the `Content-Type` header.

Processing a request body takes four steps:

1. **Normalization**. The `Content-Type` header is stripped of its parameters
   (e.g. `; charset=utf-8`), trimmed and lower-cased.
2. **Symbol resolution**. The normalized content type is mapped to a [`Symbol`], a short
   token naming a body format (e.g. `json`). Many content types can share the same symbol.
3. **Deserialization**. The [`Deserializer`] registered for the symbol decodes the body into a
   map. JSON is supported out of the box; media types can delegate to another symbol via their
   [`suffix`](MediaTypeDescriptor::suffix) (e.g. `application/vnd.acme.venue.v1+json` → `json`).
4. **Validation**. If the symbol stands for a [`MediaTypeDescriptor`], the deserialized value
   is checked against its schema.

The outcome is merged with the route parameters of the request and cached: the body of a request
is read at most once, no matter how many times its parameters are requested.

# Example

```rust
use std::sync::Arc;

use request_params::errors::ExtractParamsError;
use request_params::{
    Configuration, IncomingRequest, JsonMap, MediaTypeDescriptor, ParamsExtractor, Symbol,
    ValidationError,
};

#[derive(Debug)]
struct Venue;

impl MediaTypeDescriptor for Venue {
    // Venues are deserialized as JSON.
    fn suffix(&self) -> Option<Symbol> {
        Some(Symbol::JSON)
    }

    fn validate(&self, value: &JsonMap) -> Result<(), ValidationError> {
        match value.get("location") {
            Some(_) => Ok(()),
            None => Err(ValidationError::new("A venue must have a `location`")),
        }
    }
}

let configuration = Configuration::configure(|c| {
    c.register_content_type("application/vnd.acme.venue.v1+json", "venue")
        .lookup_media_type_by_symbol(|symbol| {
            (symbol.as_str() == "venue").then(|| Arc::new(Venue) as Arc<dyn MediaTypeDescriptor>)
        });
});
let extractor = ParamsExtractor::new(configuration);

let request = |body: &'static str| {
    let request = http::Request::builder()
        .method("POST")
        .uri("/venues")
        .header("Content-Type", "application/vnd.acme.venue.v1+json")
        .header("Content-Length", body.len())
        .body(body)
        .unwrap();
    IncomingRequest::from_http(request)
};

let valid = request(r#"{ "name": "The Corner", "location": "Amsterdam" }"#);
let params = extractor.get_request_parameters(&valid).unwrap();
assert_eq!(params["location"], "Amsterdam");

let invalid = request(r#"{ "name": "The Corner" }"#);
let err = extractor.get_request_parameters(&invalid).unwrap_err();
assert!(matches!(err, ExtractParamsError::ContentDoesNotMatchContentType(_)));
```
*/
pub mod configuration;
mod deserializer;
mod dispatcher;
pub mod errors;
mod media_type;
mod params;
pub mod registry;
pub mod request;
pub mod resolver;
pub mod symbol;

pub use configuration::{Configuration, ConfigurationBuilder, DeserializationSettings};
pub use deserializer::{
    DeserializeError, Deserializer, JsonDeserializer, SCALAR_KEY, wrap_scalar,
};
pub use dispatcher::ParamsExtractor;
pub use media_type::{JsonMap, MediaTypeDescriptor, ValidationError};
pub use params::RequestParams;
pub use request::IncomingRequest;
pub use symbol::{Symbol, SymbolLookup};
