//! Domain ports for the hexagonal boundary.
//!
//! Driven ports ([`RecordStore`]) are implemented by outbound persistence
//! adapters; driving ports ([`ResourceUseCases`]) are what inbound adapters
//! call.

mod macros;
pub(crate) use macros::define_port_error;

mod record_store;
mod resource_use_cases;

pub use record_store::{RecordStore, StoreError};
pub use resource_use_cases::ResourceUseCases;
