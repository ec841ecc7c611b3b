//! Response types for the warehouse labor API.
//!
//! This module defines the success bodies that differ from the domain types
//! and the error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::{IngestWarning, ProvisioningSummary, SkippedRow};
use crate::error::EngineError;
use crate::models::{MonthlyAgencySummary, WageRate, WeeklyWorkerSummary};

/// Response body for `/analyze`. Currency and hours are rounded to 2 dp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Monthly totals per agency.
    pub summaries: Vec<MonthlyAgencySummary>,
    /// Weekly totals and alerts per worker.
    pub weekly: Vec<WeeklyWorkerSummary>,
    /// Number of rows that became entries.
    pub entries_processed: usize,
    /// Rows that were skipped.
    pub skipped_rows: Vec<SkippedRowBody>,
    /// Warnings about kept rows.
    pub warnings: Vec<WarningBody>,
}

/// Response body for `/wage-rates/provision`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionResponse {
    /// Provisioning counts and per-worker errors.
    #[serde(flatten)]
    pub summary: ProvisioningSummary,
    /// True when nothing was written.
    pub dry_run: bool,
    /// Rows that were skipped before provisioning.
    pub skipped_rows: Vec<SkippedRowBody>,
    /// Warnings about kept rows.
    pub warnings: Vec<WarningBody>,
}

/// A skipped row in a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRowBody {
    /// 1-based row number.
    pub row: usize,
    /// Why it was skipped.
    pub reason: String,
}

impl From<SkippedRow> for SkippedRowBody {
    fn from(skipped: SkippedRow) -> Self {
        Self {
            row: skipped.row,
            reason: skipped.reason,
        }
    }
}

/// An ingestion warning in a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningBody {
    /// 1-based row number.
    pub row: usize,
    /// Worker on the row.
    pub worker_id: String,
    /// Description.
    pub message: String,
}

impl From<IngestWarning> for WarningBody {
    fn from(warning: IngestWarning) -> Self {
        Self {
            row: warning.row,
            worker_id: warning.worker_id,
            message: warning.message,
        }
    }
}

/// Response body for `GET /wage-rates/:worker_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageRateHistoryResponse {
    /// The worker.
    pub worker_id: String,
    /// Records, oldest first.
    pub wage_rates: Vec<WageRate>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidRow { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_ROW", message),
            },
            EngineError::InvalidWageRate { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_WAGE_RATE",
                    message,
                    "The wage rate data contains invalid information",
                ),
            },
            EngineError::InvalidWorker { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_WORKER", message),
            },
            EngineError::WorkerNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("WORKER_NOT_FOUND", message),
            },
            EngineError::WageRateNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("WAGE_RATE_NOT_FOUND", message),
            },
            EngineError::StoreError { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("STORE_ERROR", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_worker_not_found_maps_to_404() {
        let engine_error = EngineError::WorkerNotFound {
            worker_id: "W-404".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "WORKER_NOT_FOUND");
        assert!(api_error.error.message.contains("W-404"));
    }

    #[test]
    fn test_invalid_wage_rate_maps_to_400() {
        let engine_error = EngineError::InvalidWageRate {
            worker_id: "W1".to_string(),
            message: "base rate cannot be negative: -1".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_WAGE_RATE");
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "policy.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
