//! Domain records, ports and services.
//!
//! Purpose: Define the user and car record kinds, the transport-agnostic
//! error type and the service enforcing record business rules. Nothing here
//! knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Resource / RecordId: shared record contract.
//! - User, Car and their draft/change-set types.
//! - ResourceService: validation and orchestration over a record store.
//! - TraceId: request correlation identifier.

pub mod car;
pub mod error;
pub mod ports;
pub mod resource;
pub mod resource_service;
pub mod trace_id;
pub mod user;

pub use self::car::{CAR_MAKE_MODEL_REQUIRED, Car, CarChanges, NewCar};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::resource::{RecordId, Resource};
pub use self::resource_service::ResourceService;
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, USER_NAME_REQUIRED, User, UserChanges};

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
