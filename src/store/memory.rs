//! In-memory [`WageRateStore`].

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Agency, AgencyMarkup, WageRate, Worker};

use super::WageRateStore;

/// Keeps workers, agencies and wage rate histories in hash maps.
///
/// Wage rate histories stay sorted by effective date; records sharing a date
/// keep insertion order so the latest appended one wins on lookup.
///
/// # Example
///
/// ```
/// use warehouse_labor::models::{WageRate, WageRateSource};
/// use warehouse_labor::store::{InMemoryStore, WageRateStore};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut store = InMemoryStore::new();
/// store.append_wage_rate(WageRate {
///     worker_id: "W-001".to_string(),
///     base_rate: Decimal::new(1600, 2),
///     markup: None,
///     position: None,
///     agency: None,
///     effective_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
///     source: WageRateSource::Manual,
/// }).unwrap();
///
/// let march = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// assert!(store.wage_rate_as_of("W-001", march).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    workers: HashMap<String, Worker>,
    wage_rates: HashMap<String, Vec<WageRate>>,
    agencies: HashMap<String, Agency>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with agencies and their markup history.
    pub fn with_agencies(agencies: impl IntoIterator<Item = Agency>) -> Self {
        let agencies = agencies
            .into_iter()
            .map(|agency| (agency.name.clone(), agency))
            .collect();
        Self {
            agencies,
            ..Self::default()
        }
    }

    /// Number of wage rate records across all workers.
    pub fn wage_rate_count(&self) -> usize {
        self.wage_rates.values().map(Vec::len).sum()
    }
}

impl WageRateStore for InMemoryStore {
    fn worker(&self, worker_id: &str) -> Option<Worker> {
        self.workers.get(worker_id).cloned()
    }

    fn upsert_worker(&mut self, worker: Worker) -> EngineResult<()> {
        if worker.worker_id.trim().is_empty() {
            return Err(EngineError::StoreError {
                message: "worker id cannot be blank".to_string(),
            });
        }
        self.workers.insert(worker.worker_id.clone(), worker);
        Ok(())
    }

    fn workers(&self) -> Vec<Worker> {
        let mut workers: Vec<Worker> = self.workers.values().cloned().collect();
        workers.sort_by(|a, b| a.worker_id.cmp(&b.worker_id));
        workers
    }

    fn wage_rate_as_of(&self, worker_id: &str, as_of: NaiveDate) -> Option<WageRate> {
        self.wage_rates
            .get(worker_id)?
            .iter()
            .rfind(|r| r.effective_date <= as_of)
            .cloned()
    }

    fn wage_rate_history(&self, worker_id: &str) -> Vec<WageRate> {
        self.wage_rates.get(worker_id).cloned().unwrap_or_default()
    }

    fn wage_rates(&self) -> Vec<WageRate> {
        let mut worker_ids: Vec<&String> = self.wage_rates.keys().collect();
        worker_ids.sort();
        worker_ids
            .into_iter()
            .flat_map(|id| self.wage_rates[id].iter().cloned())
            .collect()
    }

    fn append_wage_rate(&mut self, rate: WageRate) -> EngineResult<()> {
        if rate.worker_id.trim().is_empty() {
            return Err(EngineError::InvalidWageRate {
                worker_id: rate.worker_id,
                message: "worker id cannot be blank".to_string(),
            });
        }
        if rate.base_rate < Decimal::ZERO {
            return Err(EngineError::InvalidWageRate {
                worker_id: rate.worker_id,
                message: format!("base rate cannot be negative: {}", rate.base_rate),
            });
        }
        if rate.markup.is_some_and(|m| m < Decimal::ZERO) {
            return Err(EngineError::InvalidWageRate {
                worker_id: rate.worker_id,
                message: "markup cannot be negative".to_string(),
            });
        }

        debug!(
            worker_id = %rate.worker_id,
            base_rate = %rate.base_rate,
            effective_date = %rate.effective_date,
            "Appending wage rate"
        );

        let history = self.wage_rates.entry(rate.worker_id.clone()).or_default();
        let position = history.partition_point(|r| r.effective_date <= rate.effective_date);
        history.insert(position, rate);
        Ok(())
    }

    fn agency_markup_as_of(&self, agency: &str, as_of: NaiveDate) -> Option<Decimal> {
        self.agencies.get(agency)?.markup_on(as_of)
    }

    fn add_agency_markup(&mut self, agency: &str, markup: AgencyMarkup) -> EngineResult<()> {
        if agency.trim().is_empty() {
            return Err(EngineError::StoreError {
                message: "agency name cannot be blank".to_string(),
            });
        }
        if markup.markup < Decimal::ZERO {
            return Err(EngineError::StoreError {
                message: format!("markup for '{}' cannot be negative", agency),
            });
        }
        self.agencies
            .entry(agency.to_string())
            .or_insert_with(|| Agency::new(agency))
            .add_markup(markup);
        Ok(())
    }
}
