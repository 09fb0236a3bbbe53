//! Errors that can occur while extracting the parameters of a request.
use crate::media_type::ValidationError;
use crate::request::body::errors::ExtractBufferedBodyError;

/// The error returned by
/// [`ParamsExtractor::get_request_parameters`](crate::ParamsExtractor::get_request_parameters).
///
/// Use [`ExtractParamsError::into_response`] to convert it into an HTTP response.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExtractParamsError {
    #[error(transparent)]
    /// See [`ContentTypeNotRecognised`] for details.
    ContentTypeNotRecognised(#[from] ContentTypeNotRecognised),
    #[error(transparent)]
    /// See [`ContentFormatError`] for details.
    ContentFormat(#[from] ContentFormatError),
    #[error(transparent)]
    /// See [`ContentDoesNotMatchContentType`] for details.
    ContentDoesNotMatchContentType(#[from] ContentDoesNotMatchContentType),
    #[error(transparent)]
    /// See [`ExtractBufferedBodyError`] for details.
    BufferedBody(#[from] ExtractBufferedBodyError),
    #[error(transparent)]
    /// A custom deserializer failed for a reason other than a malformed body.
    Deserializer(anyhow::Error),
}

impl ExtractParamsError {
    /// The status code that best describes this failure.
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            ExtractParamsError::ContentTypeNotRecognised(_) => {
                http::StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ExtractParamsError::ContentFormat(_) => http::StatusCode::BAD_REQUEST,
            ExtractParamsError::ContentDoesNotMatchContentType(_) => {
                http::StatusCode::UNPROCESSABLE_ENTITY
            }
            ExtractParamsError::BufferedBody(e) => e.status_code(),
            ExtractParamsError::Deserializer(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert an [`ExtractParamsError`] into an HTTP response.
    ///
    /// Server-side failures get a generic body, client-side failures
    /// are described in detail.
    pub fn into_response(&self) -> http::Response<String> {
        let status = self.status_code();
        let body = if status.is_server_error() {
            "Something went wrong while processing the request body.".to_owned()
        } else {
            self.to_string()
        };
        let mut response = http::Response::new(body);
        *response.status_mut() = status;
        response.headers_mut().insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        response
    }
}

#[derive(Debug, thiserror::Error)]
#[error("The Content-Type: {content_type} is not recognised or supported")]
#[non_exhaustive]
/// No [`Symbol`](crate::Symbol) could be resolved for the `Content-Type` of the request.
pub struct ContentTypeNotRecognised {
    /// The normalized `Content-Type` of the request.
    pub content_type: String,
}

#[derive(Debug, thiserror::Error)]
#[error("Body is not valid {}: {source}", .format.to_uppercase())]
#[non_exhaustive]
/// The request body is malformed for the format implied by its `Content-Type`
/// (e.g. broken JSON).
pub struct ContentFormatError {
    /// The name of the expected format, e.g. `json`.
    pub format: String,
    #[source]
    pub(crate) source: Box<dyn std::error::Error + Send + Sync>,
}

#[derive(Debug, thiserror::Error)]
#[error("{source}")]
#[non_exhaustive]
/// The request body was deserialized successfully, but it doesn't conform to
/// the schema of its media type.
///
/// The underlying [`ValidationError`] is available via [`std::error::Error::source`].
pub struct ContentDoesNotMatchContentType {
    #[source]
    pub(crate) source: ValidationError,
}

impl ContentDoesNotMatchContentType {
    /// The validation failure reported by the media type.
    pub fn validation_error(&self) -> &ValidationError {
        &self.source
    }
}
