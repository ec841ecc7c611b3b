//! Weekly overtime detection.
//!
//! Overtime is measured per worker per ISO week against the policy's weekly
//! threshold. Overtime hours are paid at the same rate as regular hours; the
//! split only affects reporting.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::RatePolicy;
use crate::models::{OvertimeAlert, TimesheetEntry, WeeklyWorkerSummary};

/// Weekly hours split into regular and overtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyHours {
    /// Total hours worked in the week.
    pub total: Decimal,
    /// Hours up to the threshold.
    pub regular: Decimal,
    /// Hours beyond the threshold.
    pub overtime: Decimal,
}

/// Splits a week's total hours at `threshold`.
///
/// # Example
///
/// ```
/// use warehouse_labor::calculation::split_overtime;
/// use rust_decimal::Decimal;
///
/// let week = split_overtime(Decimal::from(45), Decimal::from(40));
/// assert_eq!(week.regular, Decimal::from(40));
/// assert_eq!(week.overtime, Decimal::from(5));
/// ```
pub fn split_overtime(total: Decimal, threshold: Decimal) -> WeeklyHours {
    let regular = total.min(threshold).max(Decimal::ZERO);
    WeeklyHours {
        total,
        regular,
        overtime: total - regular,
    }
}

/// Regular and overtime portions of a single entry's hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHours {
    /// Worked hours for the entry.
    pub hours: Decimal,
    /// Portion counted as regular.
    pub regular: Decimal,
    /// Portion counted as overtime.
    pub overtime: Decimal,
}

/// Attributes each entry's hours to regular or overtime.
///
/// Entries are grouped by worker and ISO week and walked in chronological
/// order (date, then clock-in, then input order). Hours before the running
/// weekly total reaches `threshold` are regular; the rest are overtime.
/// The result is indexed like `entries`, and for every entry
/// `regular + overtime == hours`.
pub fn allocate_overtime(entries: &[TimesheetEntry], threshold: Decimal) -> Vec<EntryHours> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| {
        let (ea, eb) = (&entries[a], &entries[b]);
        (&ea.worker_id, ea.iso_week(), ea.date, ea.time_in, a)
            .cmp(&(&eb.worker_id, eb.iso_week(), eb.date, eb.time_in, b))
    });

    let mut allocation = vec![
        EntryHours {
            hours: Decimal::ZERO,
            regular: Decimal::ZERO,
            overtime: Decimal::ZERO,
        };
        entries.len()
    ];

    let mut current_week: Option<(&str, (i32, u32))> = None;
    let mut used = Decimal::ZERO;
    for index in order {
        let entry = &entries[index];
        let week = (entry.worker_id.as_str(), entry.iso_week());
        if current_week != Some(week) {
            current_week = Some(week);
            used = Decimal::ZERO;
        }

        let hours = entry.daily_hours();
        let available = (threshold - used).max(Decimal::ZERO);
        let regular = hours.min(available);
        used += hours;

        allocation[index] = EntryHours {
            hours,
            regular,
            overtime: hours - regular,
        };
    }

    allocation
}

/// Builds one summary per worker per ISO week.
///
/// Sorted by worker id, then ISO year and week. `agencies_worked` lists the
/// distinct agencies of the week sorted and comma-joined. The alert is
/// [`OvertimeAlert::Overtime`] once the total reaches the overtime
/// threshold, [`OvertimeAlert::ApproachingOvertime`] once it reaches the
/// approaching threshold.
pub fn weekly_worker_summaries(
    entries: &[TimesheetEntry],
    policy: &RatePolicy,
) -> Vec<WeeklyWorkerSummary> {
    let mut weeks: BTreeMap<(&str, i32, u32), (Decimal, BTreeSet<&str>)> = BTreeMap::new();
    for entry in entries {
        let (iso_year, week) = entry.iso_week();
        let (total, agencies) = weeks
            .entry((entry.worker_id.as_str(), iso_year, week))
            .or_default();
        *total += entry.daily_hours();
        agencies.insert(entry.agency.as_str());
    }

    let threshold = policy.weekly_overtime_threshold;
    weeks
        .into_iter()
        .map(|((worker_id, iso_year, week), (total, agencies))| {
            let split = split_overtime(total, threshold);
            let alert = if total >= threshold {
                Some(OvertimeAlert::Overtime)
            } else if total >= policy.approaching_overtime_hours {
                Some(OvertimeAlert::ApproachingOvertime)
            } else {
                None
            };

            WeeklyWorkerSummary {
                worker_id: worker_id.to_string(),
                iso_year,
                week,
                total_hours: total,
                regular_hours: split.regular,
                overtime_hours: split.overtime,
                remaining_hours: (threshold - total).max(Decimal::ZERO),
                agencies_worked: agencies.into_iter().collect::<Vec<_>>().join(", "),
                alert,
            }
        })
        .collect()
}
