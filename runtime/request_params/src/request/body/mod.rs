//! Access the body of incoming requests.
//!
//! # Overview
//!
//! Request bodies are processed in layers:
//!
//! 1. [`RawIncomingBody`] sits at the lowest level: it's the raw stream of bytes
//!    received from the client. It can only be read once.
//! 2. [`BufferedBody`] takes a [`RawIncomingBody`] and buffers it in memory.
//!    It makes sure to enforce a [size limit](BodySizeLimit) to avoid resource
//!    exhaustion attacks.
//! 3. [`Deserializer`](crate::Deserializer)s take the buffered bytes and decode them
//!    according to the media type of the request.

pub use buffered_body::BufferedBody;
pub use limit::BodySizeLimit;
pub use raw_body::RawIncomingBody;

mod buffered_body;
pub mod errors;
mod limit;
mod raw_body;
