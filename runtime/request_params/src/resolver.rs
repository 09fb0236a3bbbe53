//! Map the `Content-Type` of a request to a [`Symbol`].
use crate::configuration::Configuration;
use crate::errors::ContentTypeNotRecognised;
use crate::symbol::{Symbol, static_symbol_for};

/// Resolve the [`Symbol`] for a (normalized) content type.
///
/// - No content type, no symbol: `Ok(None)`.
/// - If a custom content type lookup is configured, its outcome is normalized
///   via [`SymbolLookup::into_symbol`](crate::SymbolLookup::into_symbol).
/// - Otherwise, registered content types are checked first, then the
///   [built-in table](crate::symbol::STATIC_LOOKUP_TABLE).
///
/// If a content type is present but no symbol can be derived for it,
/// a [`ContentTypeNotRecognised`] error is returned.
pub fn resolve_symbol(
    configuration: &Configuration,
    content_type: Option<&str>,
) -> Result<Option<Symbol>, ContentTypeNotRecognised> {
    let Some(content_type) = content_type else {
        return Ok(None);
    };
    let symbol = match &configuration.content_type_lookup {
        Some(lookup) => lookup(content_type).and_then(|outcome| outcome.into_symbol()),
        None => configuration
            .registered_symbol(content_type)
            .cloned()
            .or_else(|| static_symbol_for(content_type)),
    };
    match symbol {
        Some(symbol) => {
            tracing::debug!(
                content_type = %content_type,
                symbol = %symbol,
                "Resolved the symbol for the request content type"
            );
            Ok(Some(symbol))
        }
        None => Err(ContentTypeNotRecognised {
            content_type: content_type.to_owned(),
        }),
    }
}
