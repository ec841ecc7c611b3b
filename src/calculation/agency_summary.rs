//! Monthly cost and hours per agency.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{MonthlyAgencySummary, TimesheetEntry};

use super::cost::CostedEntry;
use super::weekly_overtime::allocate_overtime;

#[derive(Default)]
struct Totals {
    regular: Decimal,
    overtime: Decimal,
    total: Decimal,
    cost: Decimal,
}

/// Aggregates costed entries into one summary per (agency, month).
///
/// Each entry's hours are split into regular and overtime with
/// [`allocate_overtime`] against `overtime_threshold`, and both portions
/// land in the entry's own agency and month. Only groups with at least one
/// entry appear. Output is sorted by month ascending, then agency name.
/// Values are unrounded.
///
/// # Example
///
/// ```
/// use warehouse_labor::calculation::{aggregate, cost_entries, RateResolver};
/// use warehouse_labor::config::RatePolicy;
/// use warehouse_labor::models::TimesheetEntry;
/// use warehouse_labor::store::InMemoryStore;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let policy = RatePolicy::default();
/// let store = InMemoryStore::new();
/// let entry = TimesheetEntry {
///     worker_id: "W-001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     time_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     time_out: NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
///     lunch_minutes: 30,
///     agency: "JJ".to_string(),
///     position: None,
/// };
///
/// let costed = cost_entries(&[entry], &RateResolver::new(&policy, &store));
/// let summaries = aggregate(&costed, policy.weekly_overtime_threshold);
///
/// assert_eq!(summaries.len(), 1);
/// assert_eq!(summaries[0].month, "2025-03");
/// assert_eq!(summaries[0].total_cost, Decimal::from(160));
/// ```
pub fn aggregate(costed: &[CostedEntry], overtime_threshold: Decimal) -> Vec<MonthlyAgencySummary> {
    let entries: Vec<TimesheetEntry> = costed.iter().map(|c| c.entry.clone()).collect();
    let allocation = allocate_overtime(&entries, overtime_threshold);

    let mut groups: BTreeMap<(String, String), Totals> = BTreeMap::new();
    for (item, hours) in costed.iter().zip(allocation) {
        let totals = groups
            .entry((item.entry.month(), item.entry.agency.clone()))
            .or_default();
        totals.regular += hours.regular;
        totals.overtime += hours.overtime;
        totals.total += item.hours;
        totals.cost += item.cost;
    }

    groups
        .into_iter()
        .map(|((month, agency), totals)| MonthlyAgencySummary {
            agency,
            month,
            regular_hours: totals.regular,
            overtime_hours: totals.overtime,
            total_hours: totals.total,
            total_cost: totals.cost,
        })
        .collect()
}
