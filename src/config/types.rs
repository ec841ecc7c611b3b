//! Configuration types for wage-rate resolution.
//!
//! [`RatePolicy`] is the single source of truth for base rates, static
//! default markups and hour thresholds. It is deserialized from
//! `policy.yaml`, and [`RatePolicy::default`] carries the built-in values.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{Agency, AgencyMarkup};

/// Default weekly threshold above which hours count as overtime.
pub const DEFAULT_WEEKLY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Default weekly total at which a worker is flagged as approaching overtime.
pub const DEFAULT_APPROACHING_OVERTIME_HOURS: Decimal = Decimal::from_parts(35, 0, 0, false, 0);

/// Default daily hours above which a shift is flagged as unusually long.
pub const DEFAULT_LONG_SHIFT_HOURS: Decimal = Decimal::from_parts(16, 0, 0, false, 0);

/// Lunch break assumed when a row does not record one.
pub const DEFAULT_LUNCH_MINUTES: u32 = 30;

/// Base hourly rates by position.
#[derive(Debug, Clone, Deserialize)]
pub struct BaseRates {
    /// Rate for any position not listed (general labor).
    pub default: Decimal,
    /// Rates keyed by position name; keys are matched after normalization.
    #[serde(default)]
    pub positions: HashMap<String, Decimal>,
}

/// A static markup used when no dated agency markup is on record.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticMarkup {
    /// Agency labels this markup applies to (exact, case-sensitive).
    pub aliases: Vec<String>,
    /// Markup fraction.
    pub markup: Decimal,
}

/// Pay policy consulted by the resolver, the aggregators and ingestion.
#[derive(Debug, Clone, Deserialize)]
pub struct RatePolicy {
    /// Base rates by position.
    pub base_rates: BaseRates,
    /// Static default markups by agency label.
    #[serde(default)]
    pub static_markups: Vec<StaticMarkup>,
    /// Weekly hours counted as regular before overtime starts.
    #[serde(default = "default_weekly_overtime_threshold")]
    pub weekly_overtime_threshold: Decimal,
    /// Weekly hours at which the approaching-overtime alert is raised.
    #[serde(default = "default_approaching_overtime_hours")]
    pub approaching_overtime_hours: Decimal,
    /// Daily hours above which ingestion emits a long-shift warning.
    #[serde(default = "default_long_shift_hours")]
    pub long_shift_hours: Decimal,
    /// Lunch minutes assumed when a row leaves the column blank.
    #[serde(default = "default_lunch_minutes")]
    pub default_lunch_minutes: u32,
}

fn default_weekly_overtime_threshold() -> Decimal {
    DEFAULT_WEEKLY_OVERTIME_THRESHOLD
}

fn default_approaching_overtime_hours() -> Decimal {
    DEFAULT_APPROACHING_OVERTIME_HOURS
}

fn default_long_shift_hours() -> Decimal {
    DEFAULT_LONG_SHIFT_HOURS
}

fn default_lunch_minutes() -> u32 {
    DEFAULT_LUNCH_MINUTES
}

impl Default for RatePolicy {
    /// $16.00 general labor, $18.00 forklift driver; JJ 25%, Stride 30%.
    fn default() -> Self {
        let mut positions = HashMap::new();
        positions.insert("forklift driver".to_string(), Decimal::new(1800, 2));

        Self {
            base_rates: BaseRates {
                default: Decimal::new(1600, 2),
                positions,
            },
            static_markups: vec![
                StaticMarkup {
                    aliases: vec!["JJ".to_string(), "JJ Staffing".to_string()],
                    markup: Decimal::new(25, 2),
                },
                StaticMarkup {
                    aliases: vec!["Stride".to_string(), "Stride Staffing".to_string()],
                    markup: Decimal::new(30, 2),
                },
            ],
            weekly_overtime_threshold: DEFAULT_WEEKLY_OVERTIME_THRESHOLD,
            approaching_overtime_hours: DEFAULT_APPROACHING_OVERTIME_HOURS,
            long_shift_hours: DEFAULT_LONG_SHIFT_HOURS,
            default_lunch_minutes: DEFAULT_LUNCH_MINUTES,
        }
    }
}

impl RatePolicy {
    /// Normalizes a position label: trimmed and lower-cased.
    ///
    /// # Example
    ///
    /// ```
    /// use warehouse_labor::config::RatePolicy;
    ///
    /// assert_eq!(RatePolicy::normalize_position("  Forklift Driver "), "forklift driver");
    /// ```
    pub fn normalize_position(position: &str) -> String {
        position.trim().to_lowercase()
    }

    /// Base hourly rate for a position; unknown or missing positions get the default.
    ///
    /// # Example
    ///
    /// ```
    /// use warehouse_labor::config::RatePolicy;
    /// use rust_decimal::Decimal;
    ///
    /// let policy = RatePolicy::default();
    /// assert_eq!(policy.base_rate_for(Some("FORKLIFT DRIVER")), Decimal::new(1800, 2));
    /// assert_eq!(policy.base_rate_for(Some("picker")), Decimal::new(1600, 2));
    /// assert_eq!(policy.base_rate_for(None), Decimal::new(1600, 2));
    /// ```
    pub fn base_rate_for(&self, position: Option<&str>) -> Decimal {
        let Some(position) = position else {
            return self.base_rates.default;
        };
        let normalized = Self::normalize_position(position);
        self.base_rates
            .positions
            .iter()
            .find(|(name, _)| Self::normalize_position(name) == normalized)
            .map(|(_, rate)| *rate)
            .unwrap_or(self.base_rates.default)
    }

    /// Static default markup for an agency label, if the label is known.
    pub fn static_markup(&self, agency: &str) -> Option<Decimal> {
        self.static_markups
            .iter()
            .find(|m| m.aliases.iter().any(|alias| alias == agency))
            .map(|m| m.markup)
    }
}

/// A seeded agency as written in `agencies.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AgencySeed {
    /// Agency name.
    pub name: String,
    /// Markup history in any order.
    #[serde(default)]
    pub markups: Vec<AgencyMarkup>,
}

impl From<AgencySeed> for Agency {
    fn from(seed: AgencySeed) -> Self {
        let mut agency = Agency::new(seed.name);
        for markup in seed.markups {
            agency.add_markup(markup);
        }
        agency
    }
}

/// Agencies configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AgenciesConfig {
    /// Seeded agencies.
    #[serde(default)]
    pub agencies: Vec<AgencySeed>,
}
