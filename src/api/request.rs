//! Request types for the warehouse labor API.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{
    CargoMetric, CargoRecord, LaborMetric, TimeSpan, TimesheetRow, deserialize_rows,
};

/// Request body for `/analyze`.
///
/// A row that cannot be read is still accepted here; ingestion skips and
/// reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct TimesheetRequest {
    /// Uploaded timesheet rows.
    #[serde(deserialize_with = "deserialize_rows")]
    pub rows: Vec<TimesheetRow>,
}

/// Request body for `/wage-rates/provision`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisionRequest {
    /// Uploaded timesheet rows.
    #[serde(deserialize_with = "deserialize_rows")]
    pub rows: Vec<TimesheetRow>,
    /// Date new records take effect; defaults to the current UTC date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Request body for `/rates/resolve`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveRateRequest {
    /// Worker to resolve for.
    pub worker_id: String,
    /// Optional position.
    #[serde(default)]
    pub position: Option<String>,
    /// Agency name as it appears on the timesheet.
    pub agency: String,
    /// Date the rate must be effective on.
    pub date: NaiveDate,
}

/// Query string for `/wage-rates/provision`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvisionQuery {
    /// Report what would change without writing anything.
    #[serde(default)]
    pub dry_run: bool,
}

/// Query string for `GET /wage-rates`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WageRateListQuery {
    /// Only records placed through this agency.
    #[serde(default)]
    pub agency: Option<String>,
    /// Include workers that are not active.
    #[serde(default)]
    pub show_all: bool,
}

/// Query string for `GET /workers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerListQuery {
    /// Leave out inactive workers.
    #[serde(default)]
    pub active_only: bool,
}

/// Request body for `PUT /workers/:worker_id/name`.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameWorkerRequest {
    /// New display name.
    pub name: String,
}

/// Query string for `/wage-rates/:worker_id/effective`.
#[derive(Debug, Clone, Deserialize)]
pub struct EffectiveRateQuery {
    /// As-of date.
    pub date: NaiveDate,
}

/// Request body for `/cargo/relationship`.
#[derive(Debug, Clone, Deserialize)]
pub struct CargoRelationshipRequest {
    /// Cargo records.
    #[serde(default)]
    pub cargo: Vec<CargoRecord>,
    /// Timesheet rows.
    #[serde(default, deserialize_with = "deserialize_rows")]
    pub rows: Vec<TimesheetRow>,
    /// Period granularity.
    #[serde(default)]
    pub span: TimeSpan,
    /// Cargo measure.
    #[serde(default)]
    pub cargo_metric: CargoMetric,
    /// Labor measure.
    #[serde(default)]
    pub labor_metric: LaborMetric,
}
