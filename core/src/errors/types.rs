//! Error types for token verification and the order lifecycle

use thiserror::Error;

/// Reasons a bearer token is unusable for authentication
///
/// The authentication filter never surfaces these to the caller; they only
/// decide whether an identity is attached and are logged for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Unexpected token issuer: expected {expected}, got {actual}")]
    WrongIssuer { expected: String, actual: String },

    #[error("Unexpected token type: {actual}")]
    WrongType { actual: String },

    #[error("Token subject is missing")]
    MissingSubject,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Order lifecycle rule violations
///
/// All variants are client errors; they are deterministic and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Invalid status: {from} -> {to}")]
    UnrecognizedStatus { from: String, to: String },

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Cannot assign driver to order. Order must be in {required} status, but is: {current}")]
    AssignmentNotAllowed { required: String, current: String },

    #[error("Cannot assign inactive driver to order: {driver_id}")]
    InactiveDriverAssignment { driver_id: String },

    #[error("Invalid file type. Allowed extensions: {allowed}")]
    InvalidFileType { allowed: String },
}

impl OrderError {
    /// Whether this error belongs to the invalid-status-transition family
    pub fn is_invalid_transition(&self) -> bool {
        matches!(
            self,
            OrderError::UnrecognizedStatus { .. }
                | OrderError::InvalidStatusTransition { .. }
                | OrderError::AssignmentNotAllowed { .. }
        )
    }
}
