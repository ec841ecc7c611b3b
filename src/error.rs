//! Error types for the warehouse labor cost engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the conditions that can stop an operation. Soft failures (unknown
//! positions, unknown agencies) never surface here; they fall back to policy
//! defaults and are logged instead.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the engine.
///
/// # Example
///
/// ```
/// use warehouse_labor::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A timesheet row could not be turned into an entry.
    #[error("Invalid timesheet row {row}: {message}")]
    InvalidRow {
        /// One-based row number within the upload.
        row: usize,
        /// What was wrong with the row.
        message: String,
    },

    /// A wage rate or markup record was rejected.
    #[error("Invalid wage rate for worker '{worker_id}': {message}")]
    InvalidWageRate {
        /// The worker the record belongs to.
        worker_id: String,
        /// Why the record was rejected.
        message: String,
    },

    /// A worker edit was rejected.
    #[error("Invalid update for worker '{worker_id}': {message}")]
    InvalidWorker {
        /// The worker being edited.
        worker_id: String,
        /// Why the edit was rejected.
        message: String,
    },

    /// No worker exists with the given id.
    #[error("Worker not found: {worker_id}")]
    WorkerNotFound {
        /// The worker id that was looked up.
        worker_id: String,
    },

    /// No wage rate is effective for the worker on the given date.
    #[error("No wage rate for worker '{worker_id}' effective on {date}")]
    WageRateNotFound {
        /// The worker id.
        worker_id: String,
        /// The as-of date of the lookup.
        date: NaiveDate,
    },

    /// The persisted store refused an operation.
    #[error("Store error: {message}")]
    StoreError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
