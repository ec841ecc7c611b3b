//! Labor cost calculation.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::TimesheetEntry;
use crate::store::WageRateStore;

use super::rate_resolver::{RateResolver, ResolvedRate};

/// Calculates the labor cost of `hours` at `base_rate` plus `markup`.
///
/// `hours * base_rate * (1 + markup)`. Nothing is rounded here; callers
/// round with [`round_currency`](crate::models::round_currency) when
/// presenting totals.
///
/// # Example
///
/// ```
/// use warehouse_labor::calculation::compute_cost;
/// use rust_decimal::Decimal;
///
/// // 8h at $18.00 with a 25% markup
/// let cost = compute_cost(Decimal::from(8), Decimal::new(1800, 2), Decimal::new(25, 2));
/// assert_eq!(cost, Decimal::from(180));
/// ```
pub fn compute_cost(hours: Decimal, base_rate: Decimal, markup: Decimal) -> Decimal {
    hours * base_rate * (Decimal::ONE + markup)
}

/// A timesheet entry with its worked hours, resolved rate and cost.
#[derive(Debug, Clone, Serialize)]
pub struct CostedEntry {
    /// The source entry.
    pub entry: TimesheetEntry,
    /// Worked hours for the entry.
    pub hours: Decimal,
    /// The rate applied to the entry.
    pub rate: ResolvedRate,
    /// Unrounded cost of the entry.
    pub cost: Decimal,
}

/// Resolves rates for `entries` in one batch and costs each entry.
///
/// Output order matches input order.
pub fn cost_entries<S: WageRateStore + ?Sized>(
    entries: &[TimesheetEntry],
    resolver: &RateResolver<'_, S>,
) -> Vec<CostedEntry> {
    let table = resolver.resolve_batch(entries);

    entries
        .iter()
        .map(|entry| {
            let rate = table.get(entry).cloned().unwrap_or_else(|| {
                resolver.resolve(
                    &entry.worker_id,
                    entry.position.as_deref(),
                    &entry.agency,
                    entry.date,
                )
            });
            let hours = entry.daily_hours();
            let cost = compute_cost(hours, rate.base_rate, rate.markup);
            CostedEntry {
                entry: entry.clone(),
                hours,
                rate,
                cost,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RatePolicy;
    use crate::store::InMemoryStore;
    use chrono::{NaiveDate, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_cost_with_markup() {
        assert_eq!(compute_cost(dec("7.5"), dec("16.00"), dec("0.25")), dec("150"));
    }

    #[test]
    fn test_cost_without_markup() {
        assert_eq!(compute_cost(dec("8"), dec("16.00"), Decimal::ZERO), dec("128"));
    }

    #[test]
    fn test_zero_hours_costs_nothing() {
        assert_eq!(compute_cost(Decimal::ZERO, dec("18.00"), dec("0.30")), Decimal::ZERO);
    }

    #[test]
    fn test_cost_is_not_rounded() {
        // 1/3 hour at $16.00 is 5.333...
        let hours = Decimal::from(20) / Decimal::from(60);
        let cost = compute_cost(hours, dec("16.00"), Decimal::ZERO);
        assert_ne!(cost, dec("5.33"));
        assert!((cost - dec("5.3333333333")).abs() < dec("0.0000000001"));
    }

    #[test]
    fn test_cost_entries_preserves_order() {
        let policy = RatePolicy::default();
        let store = InMemoryStore::new();
        let resolver = RateResolver::new(&policy, &store);
        let entry = |worker: &str, agency: &str| TimesheetEntry {
            worker_id: worker.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            time_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            time_out: NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
            lunch_minutes: 30,
            agency: agency.to_string(),
            position: None,
        };

        let costed = cost_entries(&[entry("W2", "Stride"), entry("W1", "JJ")], &resolver);

        assert_eq!(costed.len(), 2);
        assert_eq!(costed[0].entry.worker_id, "W2");
        assert_eq!(costed[0].hours, dec("8"));
        assert_eq!(costed[0].cost, dec("166.4"));
        assert_eq!(costed[1].cost, dec("160"));
    }
}
