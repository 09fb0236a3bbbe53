use std::fmt;
use std::io::Read;

use bytes::{Buf, Bytes};

/// The raw body of an incoming HTTP request.
///
/// It's a synchronous stream of bytes: once it has been read, it's gone.
///
/// # ⚠️ Warning
///
/// `RawIncomingBody` doesn't provide any safeguards against malicious clients.
/// Use [`BufferedBody`] to read it, since it enforces a size limit.
///
/// [`BufferedBody`]: crate::request::body::BufferedBody
pub struct RawIncomingBody {
    inner: Box<dyn Read + Send>,
}

impl RawIncomingBody {
    /// Wrap an arbitrary reader.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            inner: Box::new(reader),
        }
    }
}

impl Read for RawIncomingBody {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl fmt::Debug for RawIncomingBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawIncomingBody").finish_non_exhaustive()
    }
}

impl From<Bytes> for RawIncomingBody {
    fn from(bytes: Bytes) -> Self {
        Self::from_reader(bytes.reader())
    }
}

impl From<Vec<u8>> for RawIncomingBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from(Bytes::from(bytes))
    }
}

impl From<String> for RawIncomingBody {
    fn from(s: String) -> Self {
        Self::from(Bytes::from(s))
    }
}

impl From<&'static str> for RawIncomingBody {
    fn from(s: &'static str) -> Self {
        Self::from(Bytes::from_static(s.as_bytes()))
    }
}

impl From<&'static [u8]> for RawIncomingBody {
    fn from(s: &'static [u8]) -> Self {
        Self::from(Bytes::from_static(s))
    }
}
