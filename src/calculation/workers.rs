//! Worker roster administration.
//!
//! Workers are created by provisioning and manual wage rates. This module
//! lists them, switches them between active and inactive, renames them, and
//! lists wage rate records for the workers that are still active.

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{WageRate, Worker};
use crate::store::WageRateStore;

fn find_worker<S: WageRateStore + ?Sized>(store: &S, worker_id: &str) -> EngineResult<Worker> {
    store
        .worker(worker_id)
        .ok_or_else(|| EngineError::WorkerNotFound {
            worker_id: worker_id.to_string(),
        })
}

/// Lists workers, active ones first, then by worker id.
pub fn list_workers<S: WageRateStore + ?Sized>(store: &S, active_only: bool) -> Vec<Worker> {
    let mut workers: Vec<Worker> = store
        .workers()
        .into_iter()
        .filter(|w| !active_only || w.is_active)
        .collect();
    workers.sort_by(|a, b| {
        b.is_active
            .cmp(&a.is_active)
            .then_with(|| a.worker_id.cmp(&b.worker_id))
    });
    workers
}

/// Flips a worker between active and inactive and returns the new record.
pub fn toggle_worker_active<S: WageRateStore + ?Sized>(
    store: &mut S,
    worker_id: &str,
) -> EngineResult<Worker> {
    let mut worker = find_worker(store, worker_id)?;
    worker.is_active = !worker.is_active;
    store.upsert_worker(worker.clone())?;

    info!(worker_id, is_active = worker.is_active, "Toggled worker status");
    Ok(worker)
}

/// Sets a worker's display name. The name is trimmed and cannot be blank.
pub fn rename_worker<S: WageRateStore + ?Sized>(
    store: &mut S,
    worker_id: &str,
    name: &str,
) -> EngineResult<Worker> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EngineError::InvalidWorker {
            worker_id: worker_id.to_string(),
            message: "name cannot be blank".to_string(),
        });
    }

    let mut worker = find_worker(store, worker_id)?;
    worker.name = name.to_string();
    store.upsert_worker(worker.clone())?;

    info!(worker_id, name, "Renamed worker");
    Ok(worker)
}

/// Lists wage rate records, newest first within each worker.
///
/// Only active workers are listed unless `include_inactive` is set; a rate
/// without a worker record counts as inactive. `agency` keeps only records
/// placed through that agency (exact match).
pub fn list_wage_rates<S: WageRateStore + ?Sized>(
    store: &S,
    agency: Option<&str>,
    include_inactive: bool,
) -> Vec<WageRate> {
    let mut rates: Vec<WageRate> = store
        .wage_rates()
        .into_iter()
        .filter(|r| agency.is_none_or(|a| r.agency.as_deref() == Some(a)))
        .filter(|r| {
            include_inactive || store.worker(&r.worker_id).is_some_and(|w| w.is_active)
        })
        .collect();
    rates.sort_by(|a, b| {
        a.worker_id
            .cmp(&b.worker_id)
            .then_with(|| b.effective_date.cmp(&a.effective_date))
    });
    rates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WageRateSource;
    use crate::store::InMemoryStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seed(store: &mut InMemoryStore, worker_id: &str, agency: &str, effective_date: NaiveDate) {
        store.upsert_worker(Worker::new(worker_id)).unwrap();
        store
            .append_wage_rate(WageRate {
                worker_id: worker_id.to_string(),
                base_rate: Decimal::new(1600, 2),
                markup: Some(Decimal::new(25, 2)),
                position: None,
                agency: Some(agency.to_string()),
                effective_date,
                source: WageRateSource::Provisioned,
            })
            .unwrap();
    }

    #[test]
    fn test_list_workers_puts_active_first() {
        let mut store = InMemoryStore::new();
        seed(&mut store, "W1", "JJ", date(2025, 1, 1));
        seed(&mut store, "W2", "JJ", date(2025, 1, 1));
        seed(&mut store, "W3", "JJ", date(2025, 1, 1));
        toggle_worker_active(&mut store, "W1").unwrap();

        let ids: Vec<String> = list_workers(&store, false)
            .into_iter()
            .map(|w| w.worker_id)
            .collect();
        assert_eq!(ids, vec!["W2", "W3", "W1"]);
        assert_eq!(list_workers(&store, true).len(), 2);
    }

    #[test]
    fn test_toggle_twice_restores_active() {
        let mut store = InMemoryStore::new();
        seed(&mut store, "W1", "JJ", date(2025, 1, 1));

        assert!(!toggle_worker_active(&mut store, "W1").unwrap().is_active);
        assert!(toggle_worker_active(&mut store, "W1").unwrap().is_active);
        assert!(store.worker("W1").unwrap().is_active);
    }

    #[test]
    fn test_toggle_unknown_worker_fails() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            toggle_worker_active(&mut store, "nobody"),
            Err(EngineError::WorkerNotFound { .. })
        ));
    }

    #[test]
    fn test_rename_trims_and_rejects_blank() {
        let mut store = InMemoryStore::new();
        seed(&mut store, "W1", "JJ", date(2025, 1, 1));

        assert_eq!(rename_worker(&mut store, "W1", "  Ana Lopez ").unwrap().name, "Ana Lopez");
        assert!(matches!(
            rename_worker(&mut store, "W1", "   "),
            Err(EngineError::InvalidWorker { .. })
        ));
        assert_eq!(store.worker("W1").unwrap().name, "Ana Lopez");
    }

    #[test]
    fn test_wage_rate_listing_hides_inactive_workers() {
        let mut store = InMemoryStore::new();
        seed(&mut store, "W1", "JJ", date(2025, 1, 1));
        seed(&mut store, "W1", "JJ", date(2025, 3, 1));
        seed(&mut store, "W2", "Stride", date(2025, 1, 1));
        toggle_worker_active(&mut store, "W2").unwrap();

        let active = list_wage_rates(&store, None, false);
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].effective_date, date(2025, 3, 1));
        assert!(active.iter().all(|r| r.worker_id == "W1"));

        assert_eq!(list_wage_rates(&store, None, true).len(), 3);
        assert_eq!(list_wage_rates(&store, Some("Stride"), true).len(), 1);
        assert!(list_wage_rates(&store, Some("Stride"), false).is_empty());
    }
}
