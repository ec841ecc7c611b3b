//! Core data models for the warehouse labor cost engine.
//!
//! This module contains the domain records (workers, agencies, wage rates,
//! timesheet entries, cargo lines) and the derived summary shapes.

mod cargo;
mod summary;
mod timesheet;
mod wage_rate;
mod worker;

pub use cargo::{CargoLaborPoint, CargoMetric, CargoRecord, LaborMetric, TimeSpan};
pub use summary::{MonthlyAgencySummary, OvertimeAlert, WeeklyWorkerSummary, round_currency};
pub use timesheet::{Cell, TimesheetEntry, TimesheetRow, deserialize_rows};
pub use wage_rate::{WageRate, WageRateSource};
pub use worker::{Agency, AgencyMarkup, Worker};
