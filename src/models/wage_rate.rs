//! Historical wage rate records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a wage rate record came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WageRateSource {
    /// Written by wage rate provisioning from timesheet data.
    #[default]
    Provisioned,
    /// Entered by an administrator (e.g., a negotiated pay raise).
    Manual,
}

/// A snapshot of a worker's pay parameters from `effective_date` onward.
///
/// Records are never edited in place; a change of rate appends a new record.
///
/// # Example
///
/// ```
/// use warehouse_labor::models::{WageRate, WageRateSource};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rate = WageRate {
///     worker_id: "W-001".to_string(),
///     base_rate: Decimal::new(1800, 2),
///     markup: Some(Decimal::new(25, 2)),
///     position: Some("forklift driver".to_string()),
///     agency: Some("JJ Staffing".to_string()),
///     effective_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     source: WageRateSource::Provisioned,
/// };
/// assert_eq!(rate.total_rate(), Some(Decimal::new(2250, 2)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageRate {
    /// The worker this rate belongs to.
    pub worker_id: String,
    /// Hourly base rate before agency markup.
    pub base_rate: Decimal,
    /// Agency markup fraction, if one was recorded.
    #[serde(default)]
    pub markup: Option<Decimal>,
    /// Normalized position the base rate was derived from.
    #[serde(default)]
    pub position: Option<String>,
    /// Agency the markup was derived from.
    #[serde(default)]
    pub agency: Option<String>,
    /// The date from which this record applies.
    pub effective_date: NaiveDate,
    /// Where the record came from.
    #[serde(default)]
    pub source: WageRateSource,
}

impl WageRate {
    /// Returns `base_rate × (1 + markup)` when a markup is recorded.
    pub fn total_rate(&self) -> Option<Decimal> {
        self.markup.map(|m| self.base_rate * (Decimal::ONE + m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_rate_without_markup_is_none() {
        let rate = WageRate {
            worker_id: "W-002".to_string(),
            base_rate: Decimal::new(1600, 2),
            markup: None,
            position: None,
            agency: None,
            effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            source: WageRateSource::Manual,
        };
        assert_eq!(rate.total_rate(), None);
    }

    #[test]
    fn test_deserialize_defaults_to_provisioned_source() {
        let json = r#"{
            "worker_id": "W-003",
            "base_rate": "16.00",
            "effective_date": "2025-02-01"
        }"#;
        let rate: WageRate = serde_json::from_str(json).unwrap();
        assert_eq!(rate.source, WageRateSource::Provisioned);
        assert_eq!(rate.base_rate, Decimal::new(1600, 2));
        assert!(rate.markup.is_none());
    }

    #[test]
    fn test_source_serialization() {
        assert_eq!(
            serde_json::to_string(&WageRateSource::Manual).unwrap(),
            "\"manual\""
        );
        assert_eq!(
            serde_json::to_string(&WageRateSource::Provisioned).unwrap(),
            "\"provisioned\""
        );
    }
}
