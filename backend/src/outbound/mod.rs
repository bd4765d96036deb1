//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: SQLite-backed record stores using Diesel ORM
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod persistence;
