//! Error types for the commission engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report. A calculation can only fail
//! validation; the remaining variants come from loading rate configuration.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of input record a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// The order being charged commission.
    Order,
    /// The vendor who fulfilled the order.
    Vendor,
}

impl EntityType {
    /// Returns the lowercase label used in error messages and API bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Order => "order",
            EntityType::Vendor => "vendor",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The main error type for the commission engine.
///
/// # Example
///
/// ```
/// use commission_engine::error::{EngineError, EntityType};
///
/// let error = EngineError::missing_field("order_id", EntityType::Order);
/// assert_eq!(error.to_string(), "Invalid order field 'order_id': required field is missing");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An order or vendor input was missing a required field or held an
    /// out-of-range value.
    #[error("Invalid {entity_type} field '{field}': {reason}")]
    Validation {
        /// The offending field.
        field: String,
        /// Which input record the field belongs to.
        entity_type: EntityType,
        /// What was wrong with the field.
        reason: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but its tables are inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },
}

impl EngineError {
    /// Builds a validation error for a required field that was absent.
    pub fn missing_field(field: &str, entity_type: EntityType) -> Self {
        EngineError::Validation {
            field: field.to_string(),
            entity_type,
            reason: "required field is missing".to_string(),
        }
    }

    /// Builds a validation error for a field whose value is out of range.
    pub fn invalid_field(field: &str, entity_type: EntityType, reason: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.to_string(),
            entity_type,
            reason: reason.into(),
        }
    }

    /// Returns true for validation failures, the only error a calculation raises.
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
