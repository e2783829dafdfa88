//! Error types for the Payroll Computation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading payroll data or
//! computing wages.

use thiserror::Error;

/// The main error type for the Payroll Computation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     id: "10001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: 10001");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested pay coverage period is malformed or out of range.
    #[error("Invalid pay period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// The employee is unknown to the directory or has no attendance at all.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        id: String,
    },

    /// A negative monetary, hours, or rate value reached a calculator.
    #[error("Invalid amount for '{field}': {value}")]
    InvalidAmount {
        /// The name of the offending input.
        field: String,
        /// The rejected value, rendered as text.
        value: String,
    },

    /// A required argument was missing or malformed.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// A description of the argument problem.
        message: String,
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

    /// Configuration parsed but is semantically invalid.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// An employee or attendance data file was not found.
    #[error("Data file not found: {path}")]
    DataNotFound {
        /// The path that was not found.
        path: String,
    },

    /// An employee or attendance data file has an unusable layout.
    #[error("Failed to parse data file '{path}' at line {line}: {message}")]
    DataParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// The 1-based line number of the failure.
        line: usize,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Builds an [`EngineError::InvalidAmount`] from any displayable value.
    pub fn invalid_amount(field: &str, value: impl std::fmt::Display) -> Self {
        EngineError::InvalidAmount {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
