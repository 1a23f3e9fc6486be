//! OpenAPI schemas for the error envelope.
//!
//! `domain::Error` serialises through a private DTO, so its schema is
//! registered here under the domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No session, or the credentials were wrong.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Signed in but not the owner.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The listing, review, or notification does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store or the pricing service is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// Unexpected server failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "forbidden")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "You don't have permission to do that!")]
    message: String,
    /// Request correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "7f1c4f0e-3b8a-4a55-9a43-2f1d5c9e8b10")]
    trace_id: Option<String>,
    /// Field-level context for validation failures.
    details: Option<serde_json::Value>,
}
