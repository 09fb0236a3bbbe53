//! The contract between this crate and the schema definitions of your media types.
use std::fmt::Debug;

use crate::symbol::Symbol;

/// The structured value produced by deserializing a request body.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// A (possibly versioned) media type that knows how to validate
/// the data it describes.
///
/// Implement this trait for the media types of your API, then return them from
/// a [media type lookup](crate::ConfigurationBuilder::lookup_media_type_by_symbol).
/// They are used twice when processing a request:
///
/// - to pick a deserializer, via their [`symbol`](Self::symbol) or [`suffix`](Self::suffix)
///   (e.g. `application/vnd.acme.venue.v2+json` delegates to `json`);
/// - to validate the deserialized body, via [`validate`](Self::validate).
///
/// # Example
///
/// ```rust
/// use request_params::{JsonMap, MediaTypeDescriptor, Symbol, ValidationError};
///
/// #[derive(Debug)]
/// struct Venue;
///
/// impl MediaTypeDescriptor for Venue {
///     fn suffix(&self) -> Option<Symbol> {
///         Some(Symbol::JSON)
///     }
///
///     fn validate(&self, value: &JsonMap) -> Result<(), ValidationError> {
///         if !value.contains_key("name") {
///             return Err(ValidationError::new("missing key `name`"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait MediaTypeDescriptor: Debug + Send + Sync {
    /// The symbol this media type should be deserialized as, if any.
    fn symbol(&self) -> Option<Symbol> {
        None
    }

    /// The structured syntax suffix of this media type (e.g. `json` for `+json`), if any.
    fn suffix(&self) -> Option<Symbol> {
        None
    }

    /// Check that `value` conforms to the schema of this media type.
    fn validate(&self, value: &JsonMap) -> Result<(), ValidationError>;

    /// The symbol that deserialization should be redirected to.
    ///
    /// It's the [`symbol`](Self::symbol) if there is one, the [`suffix`](Self::suffix) otherwise.
    fn redirect(&self) -> Option<Symbol> {
        self.symbol().or_else(|| self.suffix())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
#[non_exhaustive]
/// A value does not conform to the schema of its media type.
pub struct ValidationError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Keep track of the error raised by the underlying validation engine.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
