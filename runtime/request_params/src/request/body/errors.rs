//! Errors that can occur while buffering the request body.
use ubyte::ByteUnit;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned by [`BufferedBody::extract`] when the extraction fails.
///
/// [`BufferedBody::extract`]: crate::request::body::BufferedBody::extract
pub enum ExtractBufferedBodyError {
    #[error(transparent)]
    /// See [`SizeLimitExceeded`] for details.
    SizeLimitExceeded(#[from] SizeLimitExceeded),
    #[error(transparent)]
    /// See [`UnexpectedBufferError`] for details.
    UnexpectedBufferError(#[from] UnexpectedBufferError),
    #[error(transparent)]
    /// See [`BodyAlreadyConsumed`] for details.
    BodyAlreadyConsumed(#[from] BodyAlreadyConsumed),
}

impl ExtractBufferedBodyError {
    /// The status code that best describes this failure.
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            ExtractBufferedBodyError::SizeLimitExceeded(_) => http::StatusCode::PAYLOAD_TOO_LARGE,
            ExtractBufferedBodyError::UnexpectedBufferError(_)
            | ExtractBufferedBodyError::BodyAlreadyConsumed(_) => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("The request body is larger than the maximum size limit enforced by this server.")]
#[non_exhaustive]
/// The request body is larger than the maximum size limit enforced by this server.
pub struct SizeLimitExceeded {
    /// The maximum size limit enforced by this server.
    pub max_size: ByteUnit,
    /// The value of the `Content-Length` header for the request that breached the body
    /// size limit.
    ///
    /// It's set to `None` if the `Content-Length` header was missing or invalid.
    /// If it's set to `Some(n)` and `n` is smaller than `max_size`, then the request
    /// lied about the size of its body in the `Content-Length` header.
    pub content_length: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
#[error("Something went wrong while reading the request body.")]
#[non_exhaustive]
/// Something went wrong while reading the request body, but we don't know what specifically.
pub struct UnexpectedBufferError {
    #[source]
    pub(super) source: Box<dyn std::error::Error + Send + Sync>,
}

#[derive(Debug, thiserror::Error)]
#[error("The request body has already been consumed.")]
#[non_exhaustive]
/// The body was taken by an earlier attempt that failed halfway through reading it.
pub struct BodyAlreadyConsumed;
