//! End-to-end timesheet analysis.
//!
//! Chains ingestion, rate resolution, costing and aggregation for one
//! uploaded batch of rows.

use serde::Serialize;
use tracing::info;

use crate::config::RatePolicy;
use crate::models::{
    MonthlyAgencySummary, TimesheetEntry, TimesheetRow, WeeklyWorkerSummary, round_currency,
};
use crate::store::WageRateStore;

use super::agency_summary::aggregate;
use super::cost::cost_entries;
use super::ingestion::{IngestWarning, SkippedRow, ingest_rows};
use super::rate_resolver::RateResolver;
use super::weekly_overtime::weekly_worker_summaries;

/// Everything computed for an uploaded batch.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Monthly totals per agency, unrounded.
    pub summaries: Vec<MonthlyAgencySummary>,
    /// Weekly totals and alerts per worker.
    pub weekly: Vec<WeeklyWorkerSummary>,
    /// Number of rows that became entries.
    pub entries_processed: usize,
    /// Rows that were skipped.
    pub skipped_rows: Vec<SkippedRow>,
    /// Warnings about kept rows.
    pub warnings: Vec<IngestWarning>,
}

impl AnalysisReport {
    /// Returns a copy with currency and hours rounded to 2 dp for display.
    pub fn rounded(&self) -> Self {
        let weekly = self
            .weekly
            .iter()
            .map(|w| WeeklyWorkerSummary {
                total_hours: round_currency(w.total_hours),
                regular_hours: round_currency(w.regular_hours),
                overtime_hours: round_currency(w.overtime_hours),
                remaining_hours: round_currency(w.remaining_hours),
                ..w.clone()
            })
            .collect();

        Self {
            summaries: self.summaries.iter().map(MonthlyAgencySummary::rounded).collect(),
            weekly,
            ..self.clone()
        }
    }
}

/// Costs and aggregates already validated entries.
pub fn analyze_entries<S: WageRateStore + ?Sized>(
    entries: &[TimesheetEntry],
    policy: &RatePolicy,
    store: &S,
) -> (Vec<MonthlyAgencySummary>, Vec<WeeklyWorkerSummary>) {
    let resolver = RateResolver::new(policy, store);
    let costed = cost_entries(entries, &resolver);
    let summaries = aggregate(&costed, policy.weekly_overtime_threshold);
    let weekly = weekly_worker_summaries(entries, policy);
    (summaries, weekly)
}

/// Validates, costs and aggregates a batch of uploaded rows.
pub fn analyze_timesheet<S: WageRateStore + ?Sized>(
    rows: &[TimesheetRow],
    policy: &RatePolicy,
    store: &S,
) -> AnalysisReport {
    let report = ingest_rows(rows, policy);
    let (summaries, weekly) = analyze_entries(&report.entries, policy, store);

    info!(
        entries = report.entries.len(),
        summaries = summaries.len(),
        worker_weeks = weekly.len(),
        "Timesheet analysis complete"
    );

    AnalysisReport {
        summaries,
        weekly,
        entries_processed: report.entries.len(),
        skipped_rows: report.skipped,
        warnings: report.warnings,
    }
}
