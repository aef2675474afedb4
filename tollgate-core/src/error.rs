//! Core error types for Tollgate.

use thiserror::Error;

/// Core error type for Tollgate operations.
///
/// The navigation resolver and the pricing engine are total and never
/// produce these; they come from parsing user input at the edges.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown header navigation module key.
    #[error("Unknown module: {0}")]
    UnknownModule(String),

    /// Value that cannot be parsed as a filter selection.
    #[error("Invalid filter value for {dimension}: {value}")]
    InvalidFilter {
        /// Filter dimension name.
        dimension: &'static str,
        /// Rejected input.
        value: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
