//! Backend library modules.
//!
//! Domain records and services live in [`domain`]; [`outbound`] persists
//! them in SQLite and [`inbound`] exposes them over HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
pub mod startup;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::RequestLog;
