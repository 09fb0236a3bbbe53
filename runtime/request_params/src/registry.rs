//! Pick the [`Deserializer`] for a [`Symbol`].
use std::sync::Arc;

use smallvec::SmallVec;

use crate::configuration::Configuration;
use crate::deserializer::{Deserializer, JsonDeserializer};
use crate::symbol::Symbol;

/// How many times a media type can redirect deserialization to another symbol
/// before resolution stops.
///
/// The value counts hops, not symbols: `venue → hal → json` is two hops and resolves
/// to the JSON deserializer, while `a → b → c → json` stops at `c`. This leaves room
/// for a vendor type layered on an intermediate media type which is itself served as
/// JSON. Self-redirects and cycles stop earlier, when a symbol is visited twice.
pub const MAX_REDIRECTS: usize = 2;

/// Find the deserializer for `symbol`.
///
/// For every symbol visited, starting from `symbol`:
///
/// 1. if the custom deserializer lookup returns a deserializer, it's used;
/// 2. otherwise, if the symbol isn't [`Symbol::JSON`] and the media type lookup
///    returns a media type with a [redirect](crate::MediaTypeDescriptor::redirect)
///    to a symbol we haven't visited yet, we move on to that symbol;
///    at most [`MAX_REDIRECTS`] times.
///
/// When there is nowhere else to go, the built-in [`JsonDeserializer`] is returned
/// if the last symbol visited is [`Symbol::JSON`]. Otherwise, there is no deserializer.
pub fn deserializer_for(
    configuration: &Configuration,
    symbol: &Symbol,
) -> Option<Arc<dyn Deserializer>> {
    let mut visited: SmallVec<[Symbol; MAX_REDIRECTS + 1]> = SmallVec::new();
    let mut current = symbol.clone();
    loop {
        if let Some(lookup) = &configuration.deserializer_lookup {
            if let Some(deserializer) = lookup(&current) {
                tracing::trace!(symbol = %current, "Using a custom deserializer");
                return Some(deserializer);
            }
        }
        if visited.len() == MAX_REDIRECTS {
            tracing::debug!(
                symbol = %symbol,
                last_visited = %current,
                "Too many media type redirects, no further resolution will take place"
            );
            break;
        }
        visited.push(current.clone());

        let redirect = match &configuration.media_type_lookup {
            Some(lookup) if current != Symbol::JSON => {
                lookup(&current).and_then(|media_type| media_type.redirect())
            }
            _ => None,
        };
        match redirect {
            Some(next) if !visited.contains(&next) => {
                tracing::trace!(from = %current, to = %next, "Following media type redirect");
                current = next;
            }
            _ => break,
        }
    }

    if current == Symbol::JSON {
        Some(Arc::new(JsonDeserializer))
    } else {
        None
    }
}
