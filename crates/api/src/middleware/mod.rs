//! Request/response middleware.
//!
//! - [`error_path::attach_request_path`] -- Stamps the request path into error payloads.

pub mod error_path;
