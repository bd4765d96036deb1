//! HTTP inbound adapter exposing REST endpoints.

pub mod cars;
pub mod error;
pub mod routes;
pub mod state;
pub mod system;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;
