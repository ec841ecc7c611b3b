//! Calculation logic for warehouse labor costing.
//!
//! This module turns uploaded timesheet rows into validated entries, works
//! out daily hours, resolves each worker's wage rate and agency markup,
//! costs every entry, and aggregates the results into monthly agency
//! summaries and weekly worker overtime summaries. It also provisions wage
//! rates for newly seen workers, administers the worker roster and
//! correlates cargo volume with labor.

mod agency_summary;
mod analysis;
mod cargo;
mod cost;
mod daily_hours;
mod ingestion;
mod provisioning;
mod rate_resolver;
mod weekly_overtime;
mod workers;

pub use agency_summary::aggregate;
pub use analysis::{AnalysisReport, analyze_entries, analyze_timesheet};
pub use cargo::{cargo_labor_series, dedupe_cargo};
pub use cost::{CostedEntry, compute_cost, cost_entries};
pub use daily_hours::compute_daily_hours;
pub use ingestion::{
    IngestReport, IngestWarning, SkippedRow, ingest_rows, parse_date, parse_row, parse_time,
};
pub use provisioning::{
    ManualWageRate, ProvisioningSummary, add_agency_markup, effective_wage_rate,
    populate_missing_wage_rates, preview_missing_wage_rates, record_manual_wage_rate,
    wage_rate_history,
};
pub use rate_resolver::{MarkupSource, RateResolver, RateSource, RateTable, ResolvedRate};
pub use weekly_overtime::{
    EntryHours, WeeklyHours, allocate_overtime, split_overtime, weekly_worker_summaries,
};
pub use workers::{list_wage_rates, list_workers, rename_worker, toggle_worker_active};
