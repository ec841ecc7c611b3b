//! Timesheet rows and entries.
//!
//! A [`TimesheetRow`] is an uploaded record exactly as received: each field
//! is a loosely typed [`Cell`]. Ingestion turns valid rows into
//! [`TimesheetEntry`] values, which the calculators work from.

use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::calculation::compute_daily_hours;

/// A single uploaded cell.
///
/// Spreadsheet exports mix text and numbers in the same column, so every
/// column accepts either. Any other JSON value is kept so that validation
/// can reject the row with a useful message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A textual cell (may be blank).
    Text(String),
    /// A numeric cell.
    Number(serde_json::Number),
    /// Anything else (booleans, arrays, objects).
    Other(serde_json::Value),
}

impl Cell {
    /// The trimmed text of a textual or numeric cell.
    ///
    /// ```
    /// use warehouse_labor::models::Cell;
    ///
    /// assert_eq!(Cell::from(" W-9 ").as_text().as_deref(), Some("W-9"));
    /// assert_eq!(Cell::from(1042).as_text().as_deref(), Some("1042"));
    /// assert_eq!(Cell::Other(serde_json::Value::Bool(true)).as_text(), None);
    /// ```
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Text(text) => Some(text.trim().to_string()),
            Cell::Number(number) => Some(number.to_string()),
            Cell::Other(_) => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<i64> for Cell {
    fn from(number: i64) -> Self {
        Cell::Number(number.into())
    }
}

/// A raw timesheet row as uploaded.
///
/// Field names follow the upload headers; `Agency` and `role` are accepted
/// as aliases. Null cells read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetRow {
    /// Worker identifier.
    #[serde(default)]
    pub worker_id: Option<Cell>,
    /// Work date (`YYYY-MM-DD` or `M/D/YY`).
    #[serde(default)]
    pub date: Option<Cell>,
    /// Clock-in time (`HH:MM`).
    #[serde(default)]
    pub time_in: Option<Cell>,
    /// Clock-out time (`HH:MM`).
    #[serde(default)]
    pub time_out: Option<Cell>,
    /// Unpaid lunch break in minutes.
    #[serde(default)]
    pub lunch_minutes: Option<Cell>,
    /// Staffing agency name.
    #[serde(default, alias = "Agency")]
    pub agency: Option<Cell>,
    /// Worker position for this shift.
    #[serde(default, alias = "role")]
    pub position: Option<Cell>,
    /// Set when the uploaded value was not a JSON object. Such rows are
    /// always skipped.
    #[serde(skip)]
    pub unreadable: Option<String>,
}

impl TimesheetRow {
    /// Builds a row from any JSON value. Non-object values give a row marked
    /// [`unreadable`](Self::unreadable) instead of an error.
    pub fn from_value(value: serde_json::Value) -> Self {
        let kind = match &value {
            serde_json::Value::Object(_) => None,
            serde_json::Value::Null => Some("null"),
            serde_json::Value::Bool(_) => Some("a boolean"),
            serde_json::Value::Number(_) => Some("a number"),
            serde_json::Value::String(_) => Some("a string"),
            serde_json::Value::Array(_) => Some("an array"),
        };
        match kind {
            None => serde_json::from_value(value).unwrap_or_else(|e| Self {
                unreadable: Some(e.to_string()),
                ..Self::default()
            }),
            Some(kind) => Self {
                unreadable: Some(format!("row is {}, expected an object", kind)),
                ..Self::default()
            },
        }
    }
}

/// Deserializes a list of rows without letting one bad row fail the list.
///
/// Use with `#[serde(deserialize_with = "deserialize_rows")]`.
pub fn deserialize_rows<'de, D>(deserializer: D) -> Result<Vec<TimesheetRow>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(values.into_iter().map(TimesheetRow::from_value).collect())
}

/// A validated timesheet entry for one worker on one day.
///
/// # Example
///
/// ```
/// use warehouse_labor::models::TimesheetEntry;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let entry = TimesheetEntry {
///     worker_id: "W-001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     time_in: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     time_out: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
///     lunch_minutes: 30,
///     agency: "JJ".to_string(),
///     position: None,
/// };
/// assert_eq!(entry.daily_hours(), Decimal::new(75, 1));
/// assert_eq!(entry.month(), "2025-03");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    /// Worker identifier.
    pub worker_id: String,
    /// The date the shift started on.
    pub date: NaiveDate,
    /// Clock-in time of day.
    pub time_in: NaiveTime,
    /// Clock-out time of day (earlier than `time_in` for overnight shifts).
    pub time_out: NaiveTime,
    /// Unpaid lunch break in minutes.
    pub lunch_minutes: u32,
    /// The agency the hours are attributed to.
    pub agency: String,
    /// Position worked, if recorded.
    #[serde(default)]
    pub position: Option<String>,
}

impl TimesheetEntry {
    /// Worked hours for this entry.
    pub fn daily_hours(&self) -> Decimal {
        compute_daily_hours(self.time_in, self.time_out, self.lunch_minutes)
    }

    /// The ISO week the entry falls in, as `(iso_year, week)`.
    pub fn iso_week(&self) -> (i32, u32) {
        let week = self.date.iso_week();
        (week.year(), week.week())
    }

    /// The calendar month of the entry formatted as `YYYY-MM`.
    pub fn month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}
