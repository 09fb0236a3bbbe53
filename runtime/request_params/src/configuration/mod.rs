//! Configure how request bodies are resolved, deserialized and validated.
//!
//! [`Configuration`] is the key type in this module.
//! It is assembled once, at startup, and then shared (read-only) by every request.
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::deserializer::Deserializer;
use crate::media_type::MediaTypeDescriptor;
use crate::request::body::BodySizeLimit;
use crate::symbol::{Symbol, SymbolLookup};

#[cfg(feature = "config")]
mod loader;

#[cfg(feature = "config")]
pub use loader::{SettingsLoader, errors};

/// Map a content type (e.g. `application/json`) to a [`Symbol`].
pub type ContentTypeLookup = Arc<dyn Fn(&str) -> Option<SymbolLookup> + Send + Sync>;
/// Map a [`Symbol`] to the [`Deserializer`] that should be used for it.
pub type DeserializerLookup = Arc<dyn Fn(&Symbol) -> Option<Arc<dyn Deserializer>> + Send + Sync>;
/// Map a [`Symbol`] to the [`MediaTypeDescriptor`] it stands for.
pub type MediaTypeLookup =
    Arc<dyn Fn(&Symbol) -> Option<Arc<dyn MediaTypeDescriptor>> + Send + Sync>;

/// The policy used to turn request bodies into [`RequestParams`](crate::RequestParams).
///
/// All lookups are optional:
///
/// - without a [content type lookup](ConfigurationBuilder::lookup_content_type_symbol),
///   content types are resolved using the [registered content types](ConfigurationBuilder::register_content_type)
///   and then the [built-in table](crate::symbol::STATIC_LOOKUP_TABLE);
/// - without a [deserializer lookup](ConfigurationBuilder::lookup_deserializer_by_symbol),
///   only JSON bodies can be deserialized;
/// - without a [media type lookup](ConfigurationBuilder::lookup_media_type_by_symbol),
///   no validation takes place.
///
/// # Example
///
/// ```rust
/// use request_params::{Configuration, Symbol, SymbolLookup};
///
/// let configuration = Configuration::configure(|c| {
///     c.lookup_content_type_symbol(|content_type| {
///         content_type
///             .ends_with("+json")
///             .then(|| SymbolLookup::Identifier(Symbol::JSON))
///     });
/// });
/// ```
#[derive(Clone, Default)]
pub struct Configuration {
    pub(crate) content_type_lookup: Option<ContentTypeLookup>,
    pub(crate) deserializer_lookup: Option<DeserializerLookup>,
    pub(crate) media_type_lookup: Option<MediaTypeLookup>,
    pub(crate) registered_content_types: IndexMap<String, Symbol>,
    pub(crate) body_size_limit: BodySizeLimit,
}

impl Configuration {
    /// Start assembling a new [`Configuration`].
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// Run `setup` against a fresh [`ConfigurationBuilder`] and freeze the outcome.
    pub fn configure<F>(setup: F) -> Self
    where
        F: FnOnce(&mut ConfigurationBuilder),
    {
        let mut builder = Self::builder();
        setup(&mut builder);
        builder.build()
    }

    pub fn body_size_limit(&self) -> BodySizeLimit {
        self.body_size_limit
    }

    /// The symbol registered for `content_type`, if any.
    pub fn registered_symbol(&self, content_type: &str) -> Option<&Symbol> {
        self.registered_content_types.get(content_type)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("content_type_lookup", &self.content_type_lookup.is_some())
            .field("deserializer_lookup", &self.deserializer_lookup.is_some())
            .field("media_type_lookup", &self.media_type_lookup.is_some())
            .field("registered_content_types", &self.registered_content_types)
            .field("body_size_limit", &self.body_size_limit)
            .finish()
    }
}

/// A builder for [`Configuration`].
///
/// Check out [`Configuration::configure`] and [`Configuration::builder`].
#[derive(Default)]
pub struct ConfigurationBuilder {
    inner: Configuration,
}

impl ConfigurationBuilder {
    /// Set a custom strategy to map a content type to a [`Symbol`].
    ///
    /// It replaces the default strategy (registered content types, then the built-in table).
    /// Returning `None` causes the request to be rejected as
    /// [not recognised](crate::errors::ContentTypeNotRecognised).
    pub fn lookup_content_type_symbol<F>(&mut self, lookup: F) -> &mut Self
    where
        F: Fn(&str) -> Option<SymbolLookup> + Send + Sync + 'static,
    {
        self.inner.content_type_lookup = Some(Arc::new(lookup));
        self
    }

    /// Set a custom strategy to pick a [`Deserializer`] for a [`Symbol`].
    ///
    /// When it returns `None`, the default resolution rules apply.
    pub fn lookup_deserializer_by_symbol<F>(&mut self, lookup: F) -> &mut Self
    where
        F: Fn(&Symbol) -> Option<Arc<dyn Deserializer>> + Send + Sync + 'static,
    {
        self.inner.deserializer_lookup = Some(Arc::new(lookup));
        self
    }

    /// Set a custom strategy to retrieve the [`MediaTypeDescriptor`] for a [`Symbol`].
    ///
    /// Media types are used to redirect deserialization (e.g. from a vendor type to `json`)
    /// and to validate the deserialized body.
    pub fn lookup_media_type_by_symbol<F>(&mut self, lookup: F) -> &mut Self
    where
        F: Fn(&Symbol) -> Option<Arc<dyn MediaTypeDescriptor>> + Send + Sync + 'static,
    {
        self.inner.media_type_lookup = Some(Arc::new(lookup));
        self
    }

    /// Map `content_type` to `symbol` when no custom content type lookup is set.
    ///
    /// Registered content types take precedence over the built-in table.
    pub fn register_content_type(
        &mut self,
        content_type: impl Into<String>,
        symbol: impl Into<Symbol>,
    ) -> &mut Self {
        self.inner
            .registered_content_types
            .insert(content_type.into().to_ascii_lowercase(), symbol.into());
        self
    }

    /// Set the maximum size of the request bodies that will be buffered.
    pub fn body_size_limit(&mut self, limit: BodySizeLimit) -> &mut Self {
        self.inner.body_size_limit = limit;
        self
    }

    /// Apply the settings loaded from your configuration files.
    pub fn settings(&mut self, settings: DeserializationSettings) -> &mut Self {
        self.body_size_limit(settings.body_size_limit);
        for (content_type, symbol) in settings.content_types {
            self.register_content_type(content_type, symbol);
        }
        self
    }

    pub fn build(&self) -> Configuration {
        self.inner.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
/// The declarative subset of a [`Configuration`], suitable for configuration files.
///
/// ```yaml
/// body_size_limit:
///   max_size: "512 KiB"
/// content_types:
///   application/vnd.acme.venue.v2+json: venue
/// ```
pub struct DeserializationSettings {
    #[serde(default)]
    /// The maximum size of the request bodies that will be buffered.
    pub body_size_limit: BodySizeLimit,
    #[serde(default)]
    /// Additional content types, mapped to their symbol.
    pub content_types: IndexMap<String, Symbol>,
}
