//! Cargo volume versus labor correlation.
//!
//! Cargo uploads list one row per carton line, so the same master air
//! waybill (MAWB) can appear several times and on several dates. Each MAWB
//! is counted once, on the earliest date it appears.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rust_decimal::Decimal;

use crate::models::{CargoLaborPoint, CargoMetric, CargoRecord, LaborMetric, TimeSpan, TimesheetEntry};

/// Keeps the earliest record for each MAWB, sorted by date.
///
/// Records on the same date keep their input order.
pub fn dedupe_cargo(records: &[CargoRecord]) -> Vec<CargoRecord> {
    let mut sorted: Vec<&CargoRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let mut seen: HashSet<&str> = HashSet::new();
    sorted
        .into_iter()
        .filter(|r| seen.insert(r.mawb.as_str()))
        .cloned()
        .collect()
}

/// Pairs cargo volume with labor per period.
///
/// Cargo is deduplicated with [`dedupe_cargo`] first. The cargo value is
/// the number of distinct MAWBs or the carton sum; the labor value is total
/// worked hours or the number of distinct workers. Periods present on only
/// one side are filled with zero on the other. Sorted by period.
///
/// # Example
///
/// ```
/// use warehouse_labor::calculation::cargo_labor_series;
/// use warehouse_labor::models::{CargoMetric, CargoRecord, LaborMetric, TimeSpan};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let cargo = vec![CargoRecord {
///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     mawb: "176-12345675".to_string(),
///     carton_number: 40,
/// }];
///
/// let series = cargo_labor_series(&cargo, &[], TimeSpan::Month, CargoMetric::Carton, LaborMetric::Hours);
/// assert_eq!(series[0].period, "2025-03");
/// assert_eq!(series[0].cargo_value, Decimal::from(40));
/// assert_eq!(series[0].labor_value, Decimal::ZERO);
/// ```
pub fn cargo_labor_series(
    cargo: &[CargoRecord],
    entries: &[TimesheetEntry],
    span: TimeSpan,
    cargo_metric: CargoMetric,
    labor_metric: LaborMetric,
) -> Vec<CargoLaborPoint> {
    let mut cargo_by_period: BTreeMap<String, Decimal> = BTreeMap::new();
    for record in dedupe_cargo(cargo) {
        let value = match cargo_metric {
            CargoMetric::Mawb => Decimal::ONE,
            CargoMetric::Carton => Decimal::from(record.carton_number),
        };
        *cargo_by_period.entry(span.period_of(record.date)).or_default() += value;
    }

    let mut hours_by_period: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut workers_by_period: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for entry in entries {
        let period = span.period_of(entry.date);
        *hours_by_period.entry(period.clone()).or_default() += entry.daily_hours();
        workers_by_period
            .entry(period)
            .or_default()
            .insert(entry.worker_id.as_str());
    }

    let periods: BTreeSet<&String> = cargo_by_period.keys().chain(hours_by_period.keys()).collect();

    periods
        .into_iter()
        .map(|period| {
            let labor_value = match labor_metric {
                LaborMetric::Hours => hours_by_period.get(period).copied().unwrap_or_default(),
                LaborMetric::Labors => workers_by_period
                    .get(period)
                    .map(|w| Decimal::from(w.len()))
                    .unwrap_or_default(),
            };
            CargoLaborPoint {
                period: period.clone(),
                cargo_value: cargo_by_period.get(period).copied().unwrap_or_default(),
                labor_value,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cargo(date: NaiveDate, mawb: &str, cartons: u32) -> CargoRecord {
        CargoRecord {
            date,
            mawb: mawb.to_string(),
            carton_number: cartons,
        }
    }

    fn shift(worker: &str, date: NaiveDate) -> TimesheetEntry {
        TimesheetEntry {
            worker_id: worker.to_string(),
            date,
            time_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            time_out: NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
            lunch_minutes: 30,
            agency: "JJ".to_string(),
            position: None,
        }
    }

    #[test]
    fn test_dedupe_keeps_earliest_date() {
        let records = vec![
            cargo(date(2025, 3, 5), "A", 10),
            cargo(date(2025, 3, 3), "A", 20),
            cargo(date(2025, 3, 4), "B", 5),
        ];

        let deduped = dedupe_cargo(&records);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].mawb, "A");
        assert_eq!(deduped[0].date, date(2025, 3, 3));
        assert_eq!(deduped[0].carton_number, 20);
        assert_eq!(deduped[1].mawb, "B");
    }

    #[test]
    fn test_daily_mawb_count_against_hours() {
        let records = vec![
            cargo(date(2025, 3, 3), "A", 10),
            cargo(date(2025, 3, 3), "B", 10),
            cargo(date(2025, 3, 4), "A", 10),
        ];
        let entries = vec![shift("W1", date(2025, 3, 3)), shift("W2", date(2025, 3, 3))];

        let series = cargo_labor_series(&records, &entries, TimeSpan::Day, CargoMetric::Mawb, LaborMetric::Hours);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].period, "2025-03-03");
        assert_eq!(series[0].cargo_value, Decimal::from(2));
        assert_eq!(series[0].labor_value, Decimal::from(16));
    }

    #[test]
    fn test_outer_join_fills_zeroes() {
        let records = vec![cargo(date(2025, 1, 15), "A", 12)];
        let entries = vec![
            shift("W1", date(2025, 2, 3)),
            shift("W1", date(2025, 2, 4)),
            shift("W2", date(2025, 2, 4)),
        ];

        let series =
            cargo_labor_series(&records, &entries, TimeSpan::Month, CargoMetric::Carton, LaborMetric::Labors);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].period, "2025-01");
        assert_eq!(series[0].cargo_value, Decimal::from(12));
        assert_eq!(series[0].labor_value, Decimal::ZERO);
        assert_eq!(series[1].period, "2025-02");
        assert_eq!(series[1].cargo_value, Decimal::ZERO);
        assert_eq!(series[1].labor_value, Decimal::from(2));
    }

    #[test]
    fn test_yearly_span() {
        let records = vec![cargo(date(2024, 12, 31), "A", 1), cargo(date(2025, 1, 1), "B", 1)];
        let series = cargo_labor_series(&records, &[], TimeSpan::Year, CargoMetric::Mawb, LaborMetric::Hours);
        let periods: Vec<&str> = series.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, vec!["2024", "2025"]);
    }
}
