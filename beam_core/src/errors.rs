//! # Error Types
//!
//! Structured error types for beam_core. Every failure is detected while the
//! beam is being assembled, solved or sequenced, before any shear or moment is
//! accumulated, so a failed configuration never yields partial diagrams.
//!
//! The engine is deterministic: retrying a failed call reproduces the same
//! error. The configuration has to be corrected and the beam rebuilt.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span: f64) -> CalcResult<()> {
//!     if span <= 0.0 {
//!         return Err(CalcError::invalid_input("span", span.to_string(), "Span must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_span(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for beam_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for beam assembly and analysis.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The support set does not provide exactly two vertical reaction components
    #[error("Indeterminate configuration: {reason}")]
    IndeterminateConfiguration { reason: String },

    /// A support lies outside the beam span
    #[error("Invalid support position {position} - must lie within [0, {span}]")]
    InvalidSupportPosition { position: f64, span: f64 },

    /// A load (or one of its boundaries) lies outside the beam span
    #[error("Invalid load position {position} - must lie within [0, {span}]")]
    InvalidLoadPosition { position: f64, span: f64 },

    /// An extended load whose span has no positive length
    #[error("Degenerate load span [{start}, {end}] - end must be greater than start")]
    DegenerateLoadSpan { start: f64, end: f64 },

    /// Geometry that cannot be resolved unambiguously
    #[error("Overlapping load conflict at {position}: {reason}")]
    OverlappingLoadConflict { position: f64, reason: String },

    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an IndeterminateConfiguration error
    pub fn indeterminate(reason: impl Into<String>) -> Self {
        CalcError::IndeterminateConfiguration {
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an OverlappingLoadConflict error
    pub fn overlapping(position: f64, reason: impl Into<String>) -> Self {
        CalcError::OverlappingLoadConflict {
            position,
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::IndeterminateConfiguration { .. } => "INDETERMINATE_CONFIGURATION",
            CalcError::InvalidSupportPosition { .. } => "INVALID_SUPPORT_POSITION",
            CalcError::InvalidLoadPosition { .. } => "INVALID_LOAD_POSITION",
            CalcError::DegenerateLoadSpan { .. } => "DEGENERATE_LOAD_SPAN",
            CalcError::OverlappingLoadConflict { .. } => "OVERLAPPING_LOAD_CONFLICT",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::InvalidSupportPosition {
            position: -1.0,
            span: 10.0,
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("InvalidSupportPosition"));

        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::indeterminate("three supports").error_code(),
            "INDETERMINATE_CONFIGURATION"
        );
        assert_eq!(
            CalcError::DegenerateLoadSpan { start: 2.0, end: 2.0 }.error_code(),
            "DEGENERATE_LOAD_SPAN"
        );
        assert_eq!(
            CalcError::overlapping(4.0, "coincident supports").error_code(),
            "OVERLAPPING_LOAD_CONFLICT"
        );
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::DegenerateLoadSpan { start: 3.0, end: 3.0 };
        assert_eq!(
            error.to_string(),
            "Degenerate load span [3, 3] - end must be greater than start"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<f64>("not a number").unwrap_err();
        let calc: CalcError = err.into();
        assert_eq!(calc.error_code(), "SERIALIZATION_ERROR");
    }
}
