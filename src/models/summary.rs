//! Derived summary records produced by the aggregators.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Rounds a monetary or hour amount to two decimal places, half-up.
///
/// Only applied at presentation boundaries; intermediate sums stay exact.
///
/// # Example
///
/// ```
/// use warehouse_labor::models::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(10005, 3)), Decimal::new(1001, 2)); // 10.005 -> 10.01
/// assert_eq!(round_currency(Decimal::new(10004, 3)), Decimal::new(1000, 2)); // 10.004 -> 10.00
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Hours and cost for one agency in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAgencySummary {
    /// Agency name.
    pub agency: String,
    /// Calendar month, `YYYY-MM`.
    pub month: String,
    /// Hours within the weekly overtime threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the weekly overtime threshold.
    pub overtime_hours: Decimal,
    /// `regular_hours + overtime_hours`.
    pub total_hours: Decimal,
    /// Sum of per-entry costs.
    pub total_cost: Decimal,
}

impl MonthlyAgencySummary {
    /// Returns a copy with every amount rounded for display or export.
    pub fn rounded(&self) -> Self {
        Self {
            agency: self.agency.clone(),
            month: self.month.clone(),
            regular_hours: round_currency(self.regular_hours),
            overtime_hours: round_currency(self.overtime_hours),
            total_hours: round_currency(self.total_hours),
            total_cost: round_currency(self.total_cost),
        }
    }
}

/// Overtime alert level for a worker-week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeAlert {
    /// Total hours reached the overtime threshold.
    Overtime,
    /// Total hours are close to the overtime threshold.
    ApproachingOvertime,
}

/// Hours worked by one worker in one ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyWorkerSummary {
    /// Worker identifier.
    pub worker_id: String,
    /// ISO week-numbering year.
    pub iso_year: i32,
    /// ISO week number (1-53).
    pub week: u32,
    /// Total worked hours in the week.
    pub total_hours: Decimal,
    /// Hours up to the overtime threshold.
    pub regular_hours: Decimal,
    /// Hours above the overtime threshold.
    pub overtime_hours: Decimal,
    /// Threshold minus total hours (negative once in overtime).
    pub remaining_hours: Decimal,
    /// Agencies worked for during the week, sorted and comma-separated.
    pub agencies_worked: String,
    /// Alert level, if any.
    pub alert: Option<OvertimeAlert>,
}
