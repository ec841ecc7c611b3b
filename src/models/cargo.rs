//! Cargo volume records and the cargo/labor correlation series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cargo line: a master air waybill handled on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoRecord {
    /// Date the cargo was handled.
    #[serde(alias = "Date")]
    pub date: NaiveDate,
    /// Master air waybill number, unique per order.
    #[serde(alias = "MAWB")]
    pub mawb: String,
    /// Carton count on the line.
    #[serde(alias = "Carton Number")]
    pub carton_number: u32,
}

/// Period granularity for the correlation series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeSpan {
    /// `YYYY-MM-DD`
    #[default]
    Day,
    /// `YYYY-MM`
    Month,
    /// `YYYY`
    Year,
}

impl TimeSpan {
    /// Formats a date as this span's period key.
    pub fn period_of(self, date: NaiveDate) -> String {
        match self {
            TimeSpan::Day => date.format("%Y-%m-%d").to_string(),
            TimeSpan::Month => date.format("%Y-%m").to_string(),
            TimeSpan::Year => date.format("%Y").to_string(),
        }
    }
}

/// What to measure on the cargo side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CargoMetric {
    /// Number of distinct MAWBs.
    #[default]
    Mawb,
    /// Sum of carton counts.
    Carton,
}

/// What to measure on the labor side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LaborMetric {
    /// Worked hours.
    #[default]
    Hours,
    /// Number of distinct workers.
    Labors,
}

/// One period of the cargo/labor series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoLaborPoint {
    /// Period key (see [`TimeSpan`]).
    pub period: String,
    /// Cargo measure for the period.
    pub cargo_value: Decimal,
    /// Labor measure for the period.
    pub labor_value: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_of_each_span() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(TimeSpan::Day.period_of(date), "2025-03-07");
        assert_eq!(TimeSpan::Month.period_of(date), "2025-03");
        assert_eq!(TimeSpan::Year.period_of(date), "2025");
    }

    #[test]
    fn test_cargo_record_accepts_upload_headers() {
        let json = r#"{"Date": "2025-03-07", "MAWB": "176-1234", "Carton Number": 12}"#;
        let record: CargoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.mawb, "176-1234");
        assert_eq!(record.carton_number, 12);
    }
}
