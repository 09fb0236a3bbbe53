use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::media_type::MediaTypeDescriptor;

/// A short, canonical token identifying a body format (e.g. `json`).
///
/// Symbols decouple the literal `Content-Type` of a request from the way its
/// body is decoded: many content types can share the same symbol and, therefore,
/// the same deserializer.
///
/// # Example
///
/// ```rust
/// use request_params::Symbol;
///
/// let symbol = Symbol::from("venue");
/// assert_ne!(symbol, Symbol::JSON);
/// assert_eq!(symbol.as_str(), "venue");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Cow<'static, str>);

impl Symbol {
    /// The symbol for JSON bodies.
    pub const JSON: Symbol = Symbol::from_static("json");
    /// The symbol for XML bodies.
    pub const XML: Symbol = Symbol::from_static("xml");
    /// The symbol for HTML bodies.
    pub const HTML: Symbol = Symbol::from_static("html");

    /// Build a symbol out of a string literal, in a `const` context.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` if `name` can be used verbatim as a symbol.
    ///
    /// Content types (anything containing a `/`) and blank strings are rejected.
    pub(crate) fn is_bare_token(name: &str) -> bool {
        !name.is_empty() && !name.contains('/') && !name.contains(char::is_whitespace)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Symbol {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl serde::Serialize for Symbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        if !Symbol::is_bare_token(&name) {
            return Err(serde::de::Error::custom(format!(
                "`{name}` is not a valid symbol: it must be non-empty and it can't contain `/` or whitespace"
            )));
        }
        Ok(Symbol::from(name))
    }
}

/// The built-in table used to resolve a content type when no custom
/// lookup has been configured.
pub const STATIC_LOOKUP_TABLE: [(&str, Symbol); 3] = [
    ("application/json", Symbol::JSON),
    ("text/xml", Symbol::XML),
    ("text/html", Symbol::HTML),
];

/// Look up `content_type` in the [built-in table](STATIC_LOOKUP_TABLE).
pub fn static_symbol_for(content_type: &str) -> Option<Symbol> {
    STATIC_LOOKUP_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == content_type)
        .map(|(_, symbol)| symbol.clone())
}

/// What a custom content-type lookup can hand back.
///
/// Use [`SymbolLookup::into_symbol`] to turn any of the variants into a [`Symbol`].
#[derive(Debug, Clone)]
pub enum SymbolLookup {
    /// A symbol, used as is.
    Identifier(Symbol),
    /// A media type: its [`symbol`] is used, or its [`suffix`] if it has none.
    ///
    /// [`symbol`]: MediaTypeDescriptor::symbol
    /// [`suffix`]: MediaTypeDescriptor::suffix
    Descriptor(Arc<dyn MediaTypeDescriptor>),
    /// A free-form string, either a content type listed in the
    /// [built-in table](STATIC_LOOKUP_TABLE) or the name of a symbol.
    Raw(String),
}

impl SymbolLookup {
    /// Normalize the lookup result into a [`Symbol`].
    ///
    /// Returns `None` if no symbol can be derived.
    pub fn into_symbol(self) -> Option<Symbol> {
        match self {
            SymbolLookup::Identifier(symbol) => Some(symbol),
            SymbolLookup::Descriptor(descriptor) => descriptor.redirect(),
            SymbolLookup::Raw(raw) => {
                if let Some(symbol) = static_symbol_for(&raw) {
                    return Some(symbol);
                }
                Symbol::is_bare_token(&raw).then(|| Symbol::from(raw))
            }
        }
    }
}

impl From<Symbol> for SymbolLookup {
    fn from(symbol: Symbol) -> Self {
        Self::Identifier(symbol)
    }
}

impl From<Arc<dyn MediaTypeDescriptor>> for SymbolLookup {
    fn from(descriptor: Arc<dyn MediaTypeDescriptor>) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl From<String> for SymbolLookup {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<&str> for SymbolLookup {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_owned())
    }
}
