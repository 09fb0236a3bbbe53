//! Errors that can happen when collecting path parameters.
use std::str::Utf8Error;

/// The error returned by [`PathParams::from_matchit`] when one of the
/// percent-decoded path parameters is not a valid UTF8 string.
///
/// E.g. for the route `/address/{address_id}`, the path `/address/dirty%DE~%C7%1FY`
/// decodes `address_id` to bytes that are not well-formed UTF8.
///
/// [`PathParams::from_matchit`]: super::PathParams::from_matchit
#[derive(Debug, thiserror::Error)]
#[error(
    "`{invalid_raw_segment}` cannot be used as `{invalid_key}` \
since it is not a well-formed UTF8 string when percent-decoded"
)]
pub struct DecodeError {
    pub(super) invalid_key: String,
    pub(super) invalid_raw_segment: String,
    #[source]
    pub(super) source: Utf8Error,
}
