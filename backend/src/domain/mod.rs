//! Domain primitives, services and ports.
//!
//! Purpose: model per-user point balances, their append-only history and the
//! service that mutates them. Types are immutable; each documents its
//! invariants and serialisation contract in its Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - UserPoint: validated balance snapshot bounded by `MAX_POINT`.
//! - PointHistory: stored audit record of one mutation.
//! - KeyedLock: per-key mutual exclusion registry.
//! - PointService: ledger service implementing the driving ports.

pub mod error;
pub mod keyed_lock;
pub mod point;
pub mod point_history;
pub mod point_service;
pub mod ports;
pub mod trace_id;
pub mod user_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::keyed_lock::KeyedLock;
pub use self::point::{MAX_POINT, PointValidationError, UserPoint};
pub use self::point_history::{NewPointHistory, PointHistory, TransactionType};
pub use self::point_service::PointService;
pub use self::trace_id::TraceId;
pub use self::user_id::{UserId, UserIdValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use point_ledger::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::invalid_request("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
