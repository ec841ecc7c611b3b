//! Wage rate provisioning.
//!
//! After a timesheet upload, every worker seen in it should have a wage rate
//! on file that reflects their current position and agency. This module
//! creates missing records and appends new ones when the resolved rate has
//! changed. It also hosts the manual administration operations.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::RatePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AgencyMarkup, TimesheetEntry, WageRate, WageRateSource, Worker};
use crate::store::WageRateStore;

use super::rate_resolver::RateResolver;

/// Counts reported by [`populate_missing_wage_rates`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningSummary {
    /// Workers handled without error.
    pub workers_processed: usize,
    /// Workers that received their first wage rate.
    pub wage_rates_created: usize,
    /// Workers whose wage rate changed and got a new record.
    pub wage_rates_updated: usize,
    /// One message per worker that failed.
    pub errors: Vec<String>,
}

/// A worker as last seen in the upload.
#[derive(Debug)]
struct SeenWorker {
    worker_id: String,
    position: Option<String>,
    agency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Created,
    Updated,
    Unchanged,
}

/// Collects distinct workers in first-seen order. Agency follows the last
/// row; position follows the last row that has one.
fn seen_workers(entries: &[TimesheetEntry]) -> Vec<SeenWorker> {
    let mut workers: Vec<SeenWorker> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        let position = entry.position.as_deref().map(RatePolicy::normalize_position);
        match index.get(entry.worker_id.as_str()) {
            Some(&i) => {
                let seen = &mut workers[i];
                seen.agency = entry.agency.clone();
                if position.is_some() {
                    seen.position = position;
                }
            }
            None => {
                index.insert(&entry.worker_id, workers.len());
                workers.push(SeenWorker {
                    worker_id: entry.worker_id.clone(),
                    position,
                    agency: entry.agency.clone(),
                });
            }
        }
    }
    workers
}

/// Ensures every worker in `entries` has an up-to-date wage rate.
///
/// For each distinct worker:
/// - the worker record is created or refreshed with the latest position and
///   agency;
/// - with no wage rate effective on `today`, one is created from the policy
///   default for the position and the agency markup on `today`;
/// - when the latest record differs from that resolution in base rate,
///   markup, position or agency, a new record dated `today` is appended.
///   A manually entered base rate is carried forward unchanged.
///
/// Failures for one worker are logged and collected in
/// [`ProvisioningSummary::errors`]; the remaining workers are still
/// processed. Running twice on the same input changes nothing the second
/// time.
pub fn populate_missing_wage_rates<S: WageRateStore + ?Sized>(
    entries: &[TimesheetEntry],
    policy: &RatePolicy,
    store: &mut S,
    today: NaiveDate,
) -> ProvisioningSummary {
    let mut summary = ProvisioningSummary::default();

    for seen in seen_workers(entries) {
        match provision_worker(&seen, policy, store, today) {
            Ok(outcome) => {
                summary.workers_processed += 1;
                match outcome {
                    Outcome::Created => summary.wage_rates_created += 1,
                    Outcome::Updated => summary.wage_rates_updated += 1,
                    Outcome::Unchanged => {}
                }
            }
            Err(e) => {
                error!(worker_id = %seen.worker_id, error = %e, "Failed to provision wage rate");
                summary
                    .errors
                    .push(format!("worker '{}': {}", seen.worker_id, e));
            }
        }
    }

    info!(
        workers_processed = summary.workers_processed,
        created = summary.wage_rates_created,
        updated = summary.wage_rates_updated,
        errors = summary.errors.len(),
        "Wage rate provisioning complete"
    );

    summary
}

/// Reports what [`populate_missing_wage_rates`] would do without touching
/// `store`. The run happens against a copy of the store.
pub fn preview_missing_wage_rates<S: WageRateStore + Clone>(
    entries: &[TimesheetEntry],
    policy: &RatePolicy,
    store: &S,
    today: NaiveDate,
) -> ProvisioningSummary {
    info!(entries = entries.len(), "Previewing wage rate provisioning");
    let mut scratch = store.clone();
    populate_missing_wage_rates(entries, policy, &mut scratch, today)
}

fn provision_worker<S: WageRateStore + ?Sized>(
    seen: &SeenWorker,
    policy: &RatePolicy,
    store: &mut S,
    today: NaiveDate,
) -> EngineResult<Outcome> {
    if seen.worker_id.trim().is_empty() {
        return Err(EngineError::InvalidWageRate {
            worker_id: seen.worker_id.clone(),
            message: "worker id cannot be blank".to_string(),
        });
    }
    if seen.agency.trim().is_empty() {
        return Err(EngineError::InvalidWageRate {
            worker_id: seen.worker_id.clone(),
            message: "agency cannot be blank".to_string(),
        });
    }

    let existing_worker = store.worker(&seen.worker_id);
    let latest = store.wage_rate_as_of(&seen.worker_id, today);

    let position = seen
        .position
        .clone()
        .or_else(|| latest.as_ref().and_then(|r| r.position.clone()))
        .or_else(|| existing_worker.as_ref().and_then(|w| w.position.clone()));

    let mut worker = existing_worker.unwrap_or_else(|| Worker::new(&seen.worker_id));
    worker.position = position.clone();
    worker.agency = Some(seen.agency.clone());
    store.upsert_worker(worker)?;

    let resolved = RateResolver::new(policy, &*store).resolve_default(
        position.as_deref(),
        &seen.agency,
        today,
    );

    let (base_rate, source) = match &latest {
        Some(record) if record.source == WageRateSource::Manual => {
            (record.base_rate, WageRateSource::Manual)
        }
        _ => (resolved.base_rate, WageRateSource::Provisioned),
    };

    let candidate = WageRate {
        worker_id: seen.worker_id.clone(),
        base_rate,
        markup: Some(resolved.markup),
        position,
        agency: Some(seen.agency.clone()),
        effective_date: today,
        source,
    };

    let outcome = match &latest {
        None => Outcome::Created,
        Some(record) if differs(record, &candidate) => Outcome::Updated,
        Some(_) => return Ok(Outcome::Unchanged),
    };

    info!(
        worker_id = %candidate.worker_id,
        base_rate = %candidate.base_rate,
        markup = %resolved.markup,
        created = outcome == Outcome::Created,
        "Provisioned wage rate"
    );
    store.append_wage_rate(candidate)?;
    Ok(outcome)
}

fn differs(current: &WageRate, candidate: &WageRate) -> bool {
    current.base_rate != candidate.base_rate
        || current.markup != candidate.markup
        || current.position != candidate.position
        || current.agency != candidate.agency
}

/// A manually entered wage rate.
#[derive(Debug, Clone, Deserialize)]
pub struct ManualWageRate {
    /// Worker the rate applies to.
    pub worker_id: String,
    /// Base hourly rate.
    pub base_rate: Decimal,
    /// Agency the worker is placed through.
    pub agency: String,
    /// Optional position.
    #[serde(default)]
    pub position: Option<String>,
    /// First date the rate applies.
    pub effective_date: NaiveDate,
}

/// Appends a manual wage rate for a worker.
///
/// The markup is the static default for the agency (zero if unrecognized).
/// The worker record is created if missing.
///
/// # Example
///
/// ```
/// use warehouse_labor::calculation::{record_manual_wage_rate, ManualWageRate};
/// use warehouse_labor::config::RatePolicy;
/// use warehouse_labor::store::{InMemoryStore, WageRateStore};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let policy = RatePolicy::default();
/// let mut store = InMemoryStore::new();
/// let rate = record_manual_wage_rate(&mut store, &policy, ManualWageRate {
///     worker_id: "W-001".to_string(),
///     base_rate: Decimal::new(2000, 2),
///     agency: "Stride".to_string(),
///     position: None,
///     effective_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
/// }).unwrap();
///
/// assert_eq!(rate.markup, Some(Decimal::new(30, 2)));
/// assert_eq!(store.wage_rate_history("W-001").len(), 1);
/// ```
pub fn record_manual_wage_rate<S: WageRateStore + ?Sized>(
    store: &mut S,
    policy: &RatePolicy,
    input: ManualWageRate,
) -> EngineResult<WageRate> {
    if input.agency.trim().is_empty() {
        return Err(EngineError::InvalidWageRate {
            worker_id: input.worker_id,
            message: "agency cannot be blank".to_string(),
        });
    }

    let position = input
        .position
        .as_deref()
        .map(RatePolicy::normalize_position)
        .filter(|p| !p.is_empty());
    let markup = policy.static_markup(&input.agency).unwrap_or(Decimal::ZERO);

    let rate = WageRate {
        worker_id: input.worker_id.clone(),
        base_rate: input.base_rate,
        markup: Some(markup),
        position: position.clone(),
        agency: Some(input.agency.clone()),
        effective_date: input.effective_date,
        source: WageRateSource::Manual,
    };
    store.append_wage_rate(rate.clone())?;

    let mut worker = store
        .worker(&input.worker_id)
        .unwrap_or_else(|| Worker::new(&input.worker_id));
    if position.is_some() {
        worker.position = position;
    }
    worker.agency = Some(input.agency);
    store.upsert_worker(worker)?;

    info!(
        worker_id = %rate.worker_id,
        base_rate = %rate.base_rate,
        effective_date = %rate.effective_date,
        "Recorded manual wage rate"
    );
    Ok(rate)
}

/// Appends a dated markup to an agency's history.
pub fn add_agency_markup<S: WageRateStore + ?Sized>(
    store: &mut S,
    agency: &str,
    markup: Decimal,
    effective_date: NaiveDate,
) -> EngineResult<()> {
    store.add_agency_markup(
        agency,
        AgencyMarkup {
            markup,
            effective_date,
        },
    )?;
    info!(agency, markup = %markup, effective_date = %effective_date, "Added agency markup");
    Ok(())
}

/// Returns a worker's wage rate history, oldest first.
///
/// Fails with [`EngineError::WorkerNotFound`] when the worker has neither a
/// record nor any wage rate.
pub fn wage_rate_history<S: WageRateStore + ?Sized>(
    store: &S,
    worker_id: &str,
) -> EngineResult<Vec<WageRate>> {
    let history = store.wage_rate_history(worker_id);
    if history.is_empty() && store.worker(worker_id).is_none() {
        return Err(EngineError::WorkerNotFound {
            worker_id: worker_id.to_string(),
        });
    }
    Ok(history)
}

/// Returns the wage rate effective for a worker on `as_of`.
pub fn effective_wage_rate<S: WageRateStore + ?Sized>(
    store: &S,
    worker_id: &str,
    as_of: NaiveDate,
) -> EngineResult<WageRate> {
    store
        .wage_rate_as_of(worker_id, as_of)
        .ok_or_else(|| EngineError::WageRateNotFound {
            worker_id: worker_id.to_string(),
            date: as_of,
        })
}
