use std::sync::Arc;

use tracing::Level;
use tracing_log_error::log_error;

use crate::configuration::Configuration;
use crate::deserializer::DeserializeError;
use crate::errors::{ContentDoesNotMatchContentType, ContentFormatError, ExtractParamsError};
use crate::media_type::JsonMap;
use crate::params::RequestParams;
use crate::registry::deserializer_for;
use crate::request::IncomingRequest;
use crate::resolver::resolve_symbol;
use crate::symbol::Symbol;

/// Extract the parameters of an incoming request: its body, decoded according to its
/// `Content-Type`, merged with its route parameters.
///
/// A `ParamsExtractor` is built once, at startup, from a [`Configuration`].
/// It's cheap to clone and it can be shared across threads.
///
/// # Example
///
/// ```rust
/// use request_params::{Configuration, IncomingRequest, ParamsExtractor};
///
/// let extractor = ParamsExtractor::new(Configuration::default());
///
/// let body = r#"{ "foo": "bar", "numbers": [0, 1, 42] }"#;
/// let request = http::Request::builder()
///     .method("POST")
///     .uri("/")
///     .header("Content-Type", "application/json")
///     .header("Content-Length", body.len())
///     .body(body)
///     .unwrap();
/// let request = IncomingRequest::from_http(request);
///
/// let params = extractor.get_request_parameters(&request).unwrap();
/// assert_eq!(params["foo"], "bar");
/// ```
#[derive(Debug, Clone)]
pub struct ParamsExtractor {
    configuration: Arc<Configuration>,
}

impl ParamsExtractor {
    pub fn new(configuration: impl Into<Arc<Configuration>>) -> Self {
        Self {
            configuration: configuration.into(),
        }
    }

    /// Return the parameters of `request`.
    ///
    /// A successful outcome is cached on the request: subsequent calls return
    /// the same value. Failures are not cached, but the body is buffered on the request
    /// the first time it's read, so a retry decodes the same bytes and fails the same way.
    ///
    /// Requests without a `Content-Type`, or with a `Content-Length` of zero,
    /// are not deserialized: their parameters are just the route parameters.
    /// The same goes for content types that resolve to a symbol without a deserializer.
    ///
    /// # Errors
    ///
    /// Check out [`ExtractParamsError`] for the possible failure modes.
    pub fn get_request_parameters<'request>(
        &self,
        request: &'request IncomingRequest,
    ) -> Result<&'request RequestParams, ExtractParamsError> {
        request
            .params_slot()
            .get_or_try_init(|| self.extract(request))
            .inspect_err(|e| {
                log_error!(
                    e,
                    level: Level::DEBUG,
                    content_type = request.content_type(),
                    "Failed to extract the request parameters"
                );
            })
    }

    fn extract(&self, request: &IncomingRequest) -> Result<RequestParams, ExtractParamsError> {
        let body = if request.has_content() {
            self.deserialize_content(request)?
        } else {
            JsonMap::new()
        };
        let mut params = RequestParams::new(body);
        params.merge_path_params(request.path_params());
        Ok(params)
    }

    fn deserialize_content(&self, request: &IncomingRequest) -> Result<JsonMap, ExtractParamsError> {
        let Some(symbol) = resolve_symbol(&self.configuration, request.content_type())? else {
            return Ok(JsonMap::new());
        };
        let Some(deserializer) = deserializer_for(&self.configuration, &symbol) else {
            tracing::debug!(
                symbol = %symbol,
                "No deserializer available for the request content, skipping deserialization"
            );
            return Ok(JsonMap::new());
        };

        let body = request.buffered_body(self.configuration.body_size_limit)?;
        let deserialized = deserializer
            .deserialize(body)
            .map_err(|e| match e {
                DeserializeError::Format { format, source } => {
                    ExtractParamsError::ContentFormat(ContentFormatError { format, source })
                }
                DeserializeError::Other(e) => ExtractParamsError::Deserializer(e),
            })?;
        self.validate(&symbol, &deserialized)?;
        Ok(deserialized)
    }

    /// Validate `value` against the media type of `symbol`, if there is one.
    fn validate(
        &self,
        symbol: &Symbol,
        value: &JsonMap,
    ) -> Result<(), ContentDoesNotMatchContentType> {
        let Some(lookup) = &self.configuration.media_type_lookup else {
            return Ok(());
        };
        let Some(media_type) = lookup(symbol) else {
            return Ok(());
        };
        media_type
            .validate(value)
            .map_err(|source| ContentDoesNotMatchContentType { source })
    }
}

impl From<Configuration> for ParamsExtractor {
    fn from(configuration: Configuration) -> Self {
        Self::new(configuration)
    }
}
