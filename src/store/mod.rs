//! Persisted state consumed and produced by the engine.
//!
//! The engine treats workers, agency markups and wage rates as a historical
//! lookup service with one query contract: the most recent record effective
//! on or before a date. [`WageRateStore`] is that seam; [`InMemoryStore`]
//! is the implementation used by the HTTP service and the tests.

mod memory;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AgencyMarkup, WageRate, Worker};

pub use memory::InMemoryStore;

/// Historical lookup and append-only persistence for pay parameters.
pub trait WageRateStore {
    /// Returns the worker record, if one exists.
    fn worker(&self, worker_id: &str) -> Option<Worker>;

    /// Creates or replaces the worker record.
    fn upsert_worker(&mut self, worker: Worker) -> EngineResult<()>;

    /// All worker records, sorted by worker id.
    fn workers(&self) -> Vec<Worker>;

    /// Returns the worker's wage rate with the latest effective date on or
    /// before `as_of`.
    fn wage_rate_as_of(&self, worker_id: &str, as_of: NaiveDate) -> Option<WageRate>;

    /// Returns the worker's full wage rate history, oldest first.
    fn wage_rate_history(&self, worker_id: &str) -> Vec<WageRate>;

    /// Every wage rate record, by worker id then effective date.
    fn wage_rates(&self) -> Vec<WageRate>;

    /// Appends a wage rate record. Existing records are never modified.
    fn append_wage_rate(&mut self, rate: WageRate) -> EngineResult<()>;

    /// Returns the agency's markup effective on `as_of`, if the agency is
    /// known and has a record on or before that date.
    fn agency_markup_as_of(&self, agency: &str, as_of: NaiveDate) -> Option<Decimal>;

    /// Appends a markup record to the agency's history, creating the agency
    /// if needed.
    fn add_agency_markup(&mut self, agency: &str, markup: AgencyMarkup) -> EngineResult<()>;
}
