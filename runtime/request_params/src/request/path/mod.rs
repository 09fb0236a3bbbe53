//! Route parameters extracted from the URL of incoming requests.
//!
//! They are merged into the output of
//! [`ParamsExtractor::get_request_parameters`](crate::ParamsExtractor::get_request_parameters),
//! overriding any body field with the same name.
pub use path_params::PathParams;

pub mod errors;
mod path_params;
