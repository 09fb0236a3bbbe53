use std::io::Read;

use bytes::Bytes;
use ubyte::ByteUnit;

use crate::request::RequestHead;

use super::{
    BodySizeLimit, RawIncomingBody,
    errors::{ExtractBufferedBodyError, SizeLimitExceeded, UnexpectedBufferError},
};

#[derive(Debug)]
#[non_exhaustive]
/// Buffer the entire body of an incoming request in memory.
///
/// `BufferedBody` is the building block for deserializers: they need to
/// have the entire body available in memory to do their job.
///
/// # Security
///
/// `BufferedBody` enforces a [size limit](BodySizeLimit) to prevent denial-of-service attacks.
pub struct BufferedBody {
    /// The buffer of bytes that represents the body of the incoming request.
    pub bytes: Bytes,
}

impl BufferedBody {
    /// Read the whole body into memory.
    ///
    /// If extraction fails, an [`ExtractBufferedBodyError`] is returned.
    pub fn extract(
        request_head: &RequestHead,
        body: RawIncomingBody,
        body_size_limit: BodySizeLimit,
    ) -> Result<Self, ExtractBufferedBodyError> {
        match body_size_limit {
            BodySizeLimit::Enabled { max_size } => {
                Self::_extract_with_limit(request_head, body, max_size)
            }
            BodySizeLimit::Disabled => {
                let mut buffer = Vec::new();
                let mut body = body;
                body.read_to_end(&mut buffer)
                    .map_err(|e| UnexpectedBufferError { source: e.into() })?;
                Ok(Self {
                    bytes: buffer.into(),
                })
            }
        }
    }

    /// Reject requests that announce a body larger than the limit,
    /// without reading a single byte.
    pub(crate) fn check_content_length(
        request_head: &RequestHead,
        body_size_limit: BodySizeLimit,
    ) -> Result<(), SizeLimitExceeded> {
        match body_size_limit {
            BodySizeLimit::Enabled { max_size } => {
                Self::_check_content_length(request_head, max_size)
            }
            BodySizeLimit::Disabled => Ok(()),
        }
    }

    fn _check_content_length(
        request_head: &RequestHead,
        max_size: ByteUnit,
    ) -> Result<(), SizeLimitExceeded> {
        match request_head.content_length() {
            Some(len) if len > max_size.as_u64() => Err(SizeLimitExceeded {
                max_size,
                content_length: Some(len),
            }),
            _ => Ok(()),
        }
    }

    fn _extract_with_limit<B>(
        request_head: &RequestHead,
        body: B,
        max_size: ByteUnit,
    ) -> Result<Self, ExtractBufferedBodyError>
    where
        B: Read,
    {
        Self::_check_content_length(request_head, max_size)?;

        // Read one byte past the limit to detect bodies that exceed it
        // without declaring it in `Content-Length`.
        let mut buffer = Vec::new();
        body.take(max_size.as_u64().saturating_add(1))
            .read_to_end(&mut buffer)
            .map_err(|e| UnexpectedBufferError { source: e.into() })?;
        if buffer.len() as u64 > max_size.as_u64() {
            return Err(SizeLimitExceeded {
                max_size,
                content_length: request_head.content_length(),
            }
            .into());
        }
        Ok(Self {
            bytes: buffer.into(),
        })
    }
}

impl From<BufferedBody> for Bytes {
    fn from(buffered_body: BufferedBody) -> Self {
        buffered_body.bytes
    }
}
