use indexmap::IndexMap;
use percent_encoding::percent_decode_str;

use super::errors::DecodeError;

/// The route parameters of an incoming request, percent-decoded.
///
/// # Example
///
/// ```rust
/// use request_params::request::path::PathParams;
///
/// let mut router = matchit::Router::new();
/// router.insert("/venues/{venue_id}", ()).unwrap();
/// let matched = router.at("/venues/the%20corner").unwrap();
///
/// let params = PathParams::from_matchit(&matched.params).unwrap();
/// assert_eq!(params.get("venue_id"), Some("the corner"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathParams(IndexMap<String, String>);

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percent-decode the parameters captured by a [`matchit`] router.
    pub fn from_matchit(params: &matchit::Params<'_, '_>) -> Result<Self, DecodeError> {
        params
            .iter()
            .map(|(key, raw)| {
                let value = percent_decode_str(raw).decode_utf8().map_err(|e| DecodeError {
                    invalid_key: key.to_owned(),
                    invalid_raw_segment: raw.to_owned(),
                    source: e,
                })?;
                Ok::<_, DecodeError>((key.to_owned(), value.into_owned()))
            })
            .collect()
    }

    /// Set the value of a route parameter, replacing the previous one if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for PathParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
