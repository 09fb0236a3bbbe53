use http::{HeaderMap, Method, Uri, Version};

#[non_exhaustive]
#[derive(Debug, Clone)]
/// All the information that is transmitted as part of an HTTP request ahead of the body.
///
/// It includes the [method](Method), the [URI](Uri),
/// the [HTTP version](Version), and the [headers](HeaderMap).
pub struct RequestHead {
    pub method: Method,
    pub target: Uri,
    pub version: Version,
    pub headers: HeaderMap,
}

impl RequestHead {
    /// A `POST /` request over HTTP/1.1, with the given headers.
    #[cfg(test)]
    pub(crate) fn post(headers: HeaderMap) -> Self {
        Self {
            method: Method::POST,
            target: Uri::from_static("/"),
            version: Version::HTTP_11,
            headers,
        }
    }

    /// The value of the `Content-Length` header, if present and well-formed.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(http::header::CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok()?.trim().parse::<u64>().ok())
    }
}

impl From<http::request::Parts> for RequestHead {
    fn from(parts: http::request::Parts) -> Self {
        Self {
            method: parts.method,
            target: parts.uri,
            version: parts.version,
            headers: parts.headers,
        }
    }
}
