//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "use amount must be between 1 and 1000000, got 0")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, e.g. `{"code": "invalid_balance"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::TransactionType`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TransactionType)]
pub enum TransactionTypeSchema {
    /// Points were added.
    #[schema(rename = "CHARGE")]
    Charge,
    /// Points were spent.
    #[schema(rename = "USE")]
    Use,
}
