//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route: trace
//! identifiers with request logging, and the shared-secret API key check.

pub mod api_key;
pub mod request_log;

pub use api_key::ApiKeyGuard;
pub use request_log::RequestLog;
