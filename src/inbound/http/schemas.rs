//! Shared OpenAPI schemas for error bodies.

use serde::Serialize;
use utoipa::ToSchema;

/// Single-message error body, e.g. `{"message": "Access Denied!"}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorMessageSchema {
    pub message: String,
}

/// Validation failure body carrying every violation in submission order.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorsSchema {
    pub errors: Vec<String>,
}
