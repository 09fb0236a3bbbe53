use std::cell::Cell;
use std::fmt;

use bytes::Bytes;
use once_cell::unsync::OnceCell;

use crate::params::RequestParams;

use super::body::errors::{BodyAlreadyConsumed, ExtractBufferedBodyError};
use super::body::{BodySizeLimit, BufferedBody, RawIncomingBody};
use super::{RequestHead, content_type::normalize_content_type, path::PathParams};

/// An incoming HTTP request, from the perspective of a
/// [`ParamsExtractor`](crate::ParamsExtractor).
///
/// It owns all the per-request state:
///
/// - the request head and its body, read at most once and then kept in memory;
/// - the route parameters, as captured by your router;
/// - the normalized `Content-Type`, computed at most once;
/// - the cached output of
///   [`get_request_parameters`](crate::ParamsExtractor::get_request_parameters),
///   written at most once.
///
/// # Example
///
/// ```rust
/// use request_params::IncomingRequest;
///
/// let request = http::Request::builder()
///     .method("POST")
///     .uri("/venues")
///     .header("Content-Type", "application/json; charset=utf-8")
///     .body(r#"{ "name": "The Corner" }"#)
///     .unwrap();
/// let request = IncomingRequest::from_http(request);
/// assert_eq!(request.content_type(), Some("application/json"));
/// ```
pub struct IncomingRequest {
    head: RequestHead,
    body: Cell<Option<RawIncomingBody>>,
    buffered_body: OnceCell<Bytes>,
    path_params: PathParams,
    content_type: OnceCell<Option<String>>,
    params: OnceCell<RequestParams>,
}

impl IncomingRequest {
    pub fn new(head: RequestHead, body: impl Into<RawIncomingBody>) -> Self {
        Self {
            head,
            body: Cell::new(Some(body.into())),
            buffered_body: OnceCell::new(),
            path_params: PathParams::default(),
            content_type: OnceCell::new(),
            params: OnceCell::new(),
        }
    }

    /// Convert an [`http::Request`] into an [`IncomingRequest`].
    pub fn from_http<B>(request: http::Request<B>) -> Self
    where
        B: Into<RawIncomingBody>,
    {
        let (parts, body) = request.into_parts();
        Self::new(parts.into(), body)
    }

    /// Attach the route parameters captured by your router.
    pub fn with_path_params(mut self, path_params: PathParams) -> Self {
        self.path_params = path_params;
        self
    }

    pub fn head(&self) -> &RequestHead {
        &self.head
    }

    /// The `Content-Type` of the request, without parameters (e.g. `charset`).
    ///
    /// It's computed on first access and then memoized.
    /// Check out [`normalize_content_type`](super::normalize_content_type) for the details.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type
            .get_or_init(|| normalize_content_type(&self.head.headers))
            .as_deref()
    }

    /// The value of the `Content-Length` header, if present and well-formed.
    pub fn content_length(&self) -> Option<u64> {
        self.head.content_length()
    }

    /// `true` if the request declares both a `Content-Type` and a non-zero `Content-Length`.
    ///
    /// Requests without content are never deserialized.
    pub fn has_content(&self) -> bool {
        self.content_type().is_some() && self.content_length().is_some_and(|len| len > 0)
    }

    pub fn path_params(&self) -> &PathParams {
        &self.path_params
    }

    /// The parameters computed by a previous call to
    /// [`get_request_parameters`](crate::ParamsExtractor::get_request_parameters), if any.
    pub fn cached_params(&self) -> Option<&RequestParams> {
        self.params.get()
    }

    /// The whole body, buffered in memory on first access.
    ///
    /// Later calls return the same bytes without touching the body again.
    /// A `Content-Length` above `limit` is rejected before the body is taken, so that
    /// failure is reported again on every call.
    pub(crate) fn buffered_body(
        &self,
        limit: BodySizeLimit,
    ) -> Result<&Bytes, ExtractBufferedBodyError> {
        self.buffered_body.get_or_try_init(|| {
            BufferedBody::check_content_length(&self.head, limit)?;
            let body = self.take_body().ok_or(BodyAlreadyConsumed)?;
            BufferedBody::extract(&self.head, body, limit).map(Bytes::from)
        })
    }

    /// Take ownership of the body.
    ///
    /// It returns `None` if the body has already been taken.
    pub(crate) fn take_body(&self) -> Option<RawIncomingBody> {
        self.body.take()
    }

    pub(crate) fn params_slot(&self) -> &OnceCell<RequestParams> {
        &self.params
    }
}

impl fmt::Debug for IncomingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncomingRequest")
            .field("head", &self.head)
            .field("path_params", &self.path_params)
            .field("params", &self.params.get())
            .finish_non_exhaustive()
    }
}
