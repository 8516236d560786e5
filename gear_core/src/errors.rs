//! # Error Types
//!
//! Structured error types for gear_core. Every evaluator returns a
//! [`GearResult`], so a failed unit conversion or an unknown alias reaches
//! the caller as data instead of a console message.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::errors::{GearError, GearResult};
//!
//! fn validate_face_width(width_mm: f64) -> GearResult<()> {
//!     if width_mm <= 0.0 {
//!         return Err(GearError::invalid_input(
//!             "face_width",
//!             width_mm.to_string(),
//!             "Face width must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_face_width(-1.0).unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for gear_core operations
pub type GearResult<T> = Result<T, GearError>;

/// Structured error type for gear calculations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum GearError {
    /// A quantity could not be converted to the required dimension
    #[error("Unit mismatch for '{quantity}': cannot convert {from} to {expected}")]
    UnitMismatch {
        quantity: String,
        from: String,
        expected: String,
    },

    /// A required quantity was not supplied
    #[error("Missing required input: {field}")]
    MissingInput { field: String },

    /// Gear tooth system alias not recognized
    #[error("Unrecognized gear type: '{alias}' (expected full depth or stub)")]
    InvalidGearType { alias: String },

    /// Tooth profile alias not recognized
    #[error("Unrecognized tooth profile: '{alias}' (expected cast, milled, hobbed or shaved)")]
    InvalidProfile { alias: String },

    /// The geometry solver could not determine every parameter
    #[error("Gear geometry unsolvable, undetermined: {}", .missing_fields.join(", "))]
    Unsolvable { missing_fields: Vec<String> },

    /// Lookup table has no entry for the key
    #[error("No entry in {table} for {key}")]
    NotFound { table: String, key: String },

    /// An input value is degenerate (zero divisor, out of range, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl GearError {
    /// Create a UnitMismatch error
    pub fn unit_mismatch(quantity: impl Into<String>, from: impl Into<String>, expected: impl Into<String>) -> Self {
        GearError::UnitMismatch {
            quantity: quantity.into(),
            from: from.into(),
            expected: expected.into(),
        }
    }

    /// Create a MissingInput error
    pub fn missing_input(field: impl Into<String>) -> Self {
        GearError::MissingInput { field: field.into() }
    }

    /// Create an InvalidGearType error
    pub fn invalid_gear_type(alias: impl Into<String>) -> Self {
        GearError::InvalidGearType { alias: alias.into() }
    }

    /// Create an InvalidProfile error
    pub fn invalid_profile(alias: impl Into<String>) -> Self {
        GearError::InvalidProfile { alias: alias.into() }
    }

    /// Create a NotFound error
    pub fn not_found(table: impl Into<String>, key: impl Into<String>) -> Self {
        GearError::NotFound {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        GearError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        GearError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            GearError::UnitMismatch { .. } => "UNIT_MISMATCH",
            GearError::MissingInput { .. } => "MISSING_INPUT",
            GearError::InvalidGearType { .. } => "INVALID_GEAR_TYPE",
            GearError::InvalidProfile { .. } => "INVALID_PROFILE",
            GearError::Unsolvable { .. } => "UNSOLVABLE",
            GearError::NotFound { .. } => "NOT_FOUND",
            GearError::InvalidInput { .. } => "INVALID_INPUT",
            GearError::FileError { .. } => "FILE_ERROR",
            GearError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for GearError {
    fn from(err: serde_json::Error) -> Self {
        GearError::SerializationError {
            reason: err.to_string(),
        }
    }
}
