//! The incoming request, as seen by a [`ParamsExtractor`](crate::ParamsExtractor).
pub use incoming::IncomingRequest;
pub use request_head::RequestHead;

pub mod body;
mod content_type;
mod incoming;
pub mod path;
mod request_head;

pub use content_type::normalize_content_type;
