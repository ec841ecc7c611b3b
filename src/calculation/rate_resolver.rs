//! Wage rate resolution.
//!
//! This module decides the base hourly rate and agency markup that apply to
//! a worker on a given date. Persisted wage rates win; otherwise the rate
//! policy supplies a position default and the agency markup comes from the
//! dated agency history, then the static defaults.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RatePolicy;
use crate::models::TimesheetEntry;
use crate::store::WageRateStore;

/// Where the base rate of a [`ResolvedRate`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// A persisted wage rate record for the worker.
    WageRate,
    /// The policy default for the worker's position.
    PositionDefault,
}

/// Where the markup of a [`ResolvedRate`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupSource {
    /// The markup stored on the worker's wage rate record.
    WageRate,
    /// The agency's dated markup history.
    AgencyHistory,
    /// The static default markup for a known agency alias.
    StaticDefault,
    /// Nothing matched; the markup is zero.
    Unknown,
}

/// The outcome of resolving pay parameters for one worker-date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRate {
    /// Base hourly rate.
    pub base_rate: Decimal,
    /// Agency markup fraction.
    pub markup: Decimal,
    /// `base_rate * (1 + markup)`.
    pub total_rate: Decimal,
    /// Where the base rate came from.
    pub rate_source: RateSource,
    /// Where the markup came from.
    pub markup_source: MarkupSource,
}

impl ResolvedRate {
    fn new(
        base_rate: Decimal,
        markup: Decimal,
        rate_source: RateSource,
        markup_source: MarkupSource,
    ) -> Self {
        Self {
            base_rate,
            markup,
            total_rate: base_rate * (Decimal::ONE + markup),
            rate_source,
            markup_source,
        }
    }
}

/// Resolves base rates and markups against a policy and a store.
///
/// # Example
///
/// ```
/// use warehouse_labor::calculation::{MarkupSource, RateResolver};
/// use warehouse_labor::config::RatePolicy;
/// use warehouse_labor::store::InMemoryStore;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let policy = RatePolicy::default();
/// let store = InMemoryStore::new();
/// let resolver = RateResolver::new(&policy, &store);
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let rate = resolver.resolve("W-001", Some("forklift driver"), "JJ Staffing", date);
///
/// assert_eq!(rate.base_rate, Decimal::new(1800, 2));
/// assert_eq!(rate.markup, Decimal::new(25, 2));
/// assert_eq!(rate.total_rate, Decimal::new(2250, 2));
/// assert_eq!(rate.markup_source, MarkupSource::StaticDefault);
/// ```
pub struct RateResolver<'a, S: WageRateStore + ?Sized> {
    policy: &'a RatePolicy,
    store: &'a S,
}

impl<'a, S: WageRateStore + ?Sized> RateResolver<'a, S> {
    /// Creates a resolver over the given policy and store.
    pub fn new(policy: &'a RatePolicy, store: &'a S) -> Self {
        Self { policy, store }
    }

    /// Resolves the rate for a worker on `as_of`.
    ///
    /// 1. The worker's latest wage rate effective on or before `as_of` is used
    ///    if one exists. Its stored markup is used when present; otherwise the
    ///    static default for `agency` applies.
    /// 2. Otherwise [`RateResolver::resolve_default`] applies.
    ///
    /// This never fails. An unrecognized agency resolves to a zero markup.
    pub fn resolve(
        &self,
        worker_id: &str,
        position: Option<&str>,
        agency: &str,
        as_of: NaiveDate,
    ) -> ResolvedRate {
        if let Some(record) = self.store.wage_rate_as_of(worker_id, as_of) {
            let (markup, markup_source) = match record.markup {
                Some(markup) => (markup, MarkupSource::WageRate),
                None => self.static_markup(agency),
            };
            debug!(
                worker_id,
                effective_date = %record.effective_date,
                base_rate = %record.base_rate,
                "Resolved rate from wage rate record"
            );
            return ResolvedRate::new(record.base_rate, markup, RateSource::WageRate, markup_source);
        }

        self.resolve_default(position, agency, as_of)
    }

    /// Resolves the rate from policy and agency history alone, ignoring any
    /// persisted wage rate.
    ///
    /// The base rate is the position default. The markup is the agency's
    /// dated markup on `as_of` if on record, else the static default for a
    /// known alias, else zero.
    pub fn resolve_default(
        &self,
        position: Option<&str>,
        agency: &str,
        as_of: NaiveDate,
    ) -> ResolvedRate {
        let base_rate = self.policy.base_rate_for(position);
        let (markup, markup_source) = match self.store.agency_markup_as_of(agency, as_of) {
            Some(markup) => (markup, MarkupSource::AgencyHistory),
            None => self.static_markup(agency),
        };
        ResolvedRate::new(base_rate, markup, RateSource::PositionDefault, markup_source)
    }

    /// Resolves every distinct worker-date combination in `entries` once.
    pub fn resolve_batch(&self, entries: &[TimesheetEntry]) -> RateTable {
        let mut rates = HashMap::new();
        for entry in entries {
            rates.entry(RateKey::from(entry)).or_insert_with(|| {
                self.resolve(
                    &entry.worker_id,
                    entry.position.as_deref(),
                    &entry.agency,
                    entry.date,
                )
            });
        }
        debug!(entries = entries.len(), distinct = rates.len(), "Resolved rate batch");
        RateTable { rates }
    }

    fn static_markup(&self, agency: &str) -> (Decimal, MarkupSource) {
        match self.policy.static_markup(agency) {
            Some(markup) => (markup, MarkupSource::StaticDefault),
            None => {
                warn!(agency, "No markup found for agency, using zero");
                (Decimal::ZERO, MarkupSource::Unknown)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RateKey {
    worker_id: String,
    position: Option<String>,
    agency: String,
    date: NaiveDate,
}

impl From<&TimesheetEntry> for RateKey {
    fn from(entry: &TimesheetEntry) -> Self {
        Self {
            worker_id: entry.worker_id.clone(),
            position: entry.position.clone(),
            agency: entry.agency.clone(),
            date: entry.date,
        }
    }
}

/// Rates resolved for a batch of entries by [`RateResolver::resolve_batch`].
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<RateKey, ResolvedRate>,
}

impl RateTable {
    /// Looks up the rate resolved for an entry of the batch.
    pub fn get(&self, entry: &TimesheetEntry) -> Option<&ResolvedRate> {
        self.rates.get(&RateKey::from(entry))
    }

    /// Number of distinct worker-date combinations resolved.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
