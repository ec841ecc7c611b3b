//! Worker and staffing agency models.
//!
//! Workers are long-lived records keyed by `worker_id`. Agencies carry a
//! dated markup history; the applicable markup for a date is the latest
//! record effective on or before it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A warehouse worker supplied by a staffing agency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier for the worker (usually the worker's name).
    pub worker_id: String,
    /// Display name.
    pub name: String,
    /// The worker's current position (e.g., "forklift driver").
    #[serde(default)]
    pub position: Option<String>,
    /// The agency the worker is currently placed through.
    #[serde(default)]
    pub agency: Option<String>,
    /// Whether the worker is currently active.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Worker {
    /// Creates an active worker whose display name is the worker id.
    pub fn new(worker_id: impl Into<String>) -> Self {
        let worker_id = worker_id.into();
        Self {
            name: worker_id.clone(),
            worker_id,
            position: None,
            agency: None,
            is_active: true,
        }
    }
}

/// A single dated markup record for an agency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyMarkup {
    /// Markup fraction (0.25 means 25% on top of base rate).
    pub markup: Decimal,
    /// The date from which this markup applies.
    pub effective_date: NaiveDate,
}

/// A staffing agency and its markup history.
///
/// # Example
///
/// ```
/// use warehouse_labor::models::{Agency, AgencyMarkup};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut agency = Agency::new("JJ Staffing");
/// agency.add_markup(AgencyMarkup {
///     markup: Decimal::new(25, 2),
///     effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// });
///
/// assert_eq!(
///     agency.markup_on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
///     Some(Decimal::new(25, 2))
/// );
/// assert_eq!(agency.markup_on(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agency {
    /// The agency name. Matching is exact and case-sensitive.
    pub name: String,
    /// Markup history sorted by effective date, oldest first.
    #[serde(default)]
    pub markups: Vec<AgencyMarkup>,
}

impl Agency {
    /// Creates an agency with no markup history.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markups: Vec::new(),
        }
    }

    /// Appends a markup record, keeping the history sorted by effective date.
    ///
    /// Records sharing an effective date keep insertion order, so the most
    /// recently added one wins on lookup.
    pub fn add_markup(&mut self, markup: AgencyMarkup) {
        let position = self
            .markups
            .partition_point(|m| m.effective_date <= markup.effective_date);
        self.markups.insert(position, markup);
    }

    /// Returns the markup effective on the given date, if any.
    pub fn markup_on(&self, date: NaiveDate) -> Option<Decimal> {
        self.markups
            .iter()
            .rfind(|m| m.effective_date <= date)
            .map(|m| m.markup)
    }
}
