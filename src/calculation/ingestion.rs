//! Timesheet row validation.
//!
//! Uploaded rows arrive as loosely typed text. This module turns them into
//! [`TimesheetEntry`] values, skipping rows that cannot be used and warning
//! about rows that parse but look wrong.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::RatePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{Cell, TimesheetEntry, TimesheetRow};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%y"];
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// A row that was left out of the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based row number in the upload.
    pub row: usize,
    /// Why the row was skipped.
    pub reason: String,
}

/// A row that was kept but looks suspicious.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestWarning {
    /// 1-based row number in the upload.
    pub row: usize,
    /// Worker on the row.
    pub worker_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Result of validating a batch of rows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    /// Entries that passed validation, in input order.
    pub entries: Vec<TimesheetEntry>,
    /// Rows that were skipped.
    pub skipped: Vec<SkippedRow>,
    /// Warnings about kept rows.
    pub warnings: Vec<IngestWarning>,
}

/// Parses a date in `YYYY-MM-DD` or `M/D/YY` form.
///
/// # Example
///
/// ```
/// use warehouse_labor::calculation::parse_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 3, 4);
/// assert_eq!(parse_date("2025-03-04"), expected);
/// assert_eq!(parse_date("3/4/25"), expected);
/// assert_eq!(parse_date("yesterday"), None);
/// ```
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Parses a time of day in `HH:MM` or `HH:MM:SS` form.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}

fn invalid(row: usize, message: String) -> EngineError {
    EngineError::InvalidRow { row, message }
}

fn required(value: &Option<Cell>, field: &str, row: usize) -> EngineResult<String> {
    let cell = value
        .as_ref()
        .ok_or_else(|| invalid(row, format!("missing {}", field)))?;
    let text = cell
        .as_text()
        .ok_or_else(|| invalid(row, format!("{} must be text or a number", field)))?;
    if text.is_empty() {
        return Err(invalid(row, format!("missing {}", field)));
    }
    Ok(text)
}

fn lunch_minutes(value: &Option<Cell>, default: u32, row: usize) -> EngineResult<u32> {
    let text = match value.as_ref().map(Cell::as_text) {
        None => return Ok(default),
        Some(None) => {
            return Err(invalid(row, "lunch_minutes must be text or a number".to_string()));
        }
        Some(Some(text)) if text.is_empty() => return Ok(default),
        Some(Some(text)) => text,
    };

    // Spreadsheet exports often write whole minutes as "30.0".
    let minutes = Decimal::from_str(&text)
        .ok()
        .filter(|m| m.fract().is_zero())
        .ok_or_else(|| invalid(row, format!("lunch_minutes is not a whole number: '{}'", text)))?;
    if minutes < Decimal::ZERO {
        return Err(invalid(row, format!("lunch_minutes cannot be negative: {}", text)));
    }
    minutes
        .to_u32()
        .ok_or_else(|| invalid(row, format!("lunch_minutes is too large: {}", text)))
}

/// Validates a single row.
///
/// `row` is the 1-based row number used in error messages. Blank required
/// fields, unparseable dates or times, and negative or non-integer lunch
/// values are rejected with [`EngineError::InvalidRow`].
pub fn parse_row(row: &TimesheetRow, row_number: usize, policy: &RatePolicy) -> EngineResult<TimesheetEntry> {
    if let Some(reason) = &row.unreadable {
        return Err(invalid(row_number, reason.clone()));
    }

    let worker_id = required(&row.worker_id, "worker_id", row_number)?;
    let date_text = required(&row.date, "date", row_number)?;
    let time_in_text = required(&row.time_in, "time_in", row_number)?;
    let time_out_text = required(&row.time_out, "time_out", row_number)?;
    let agency = required(&row.agency, "agency", row_number)?;

    let date = parse_date(&date_text)
        .ok_or_else(|| invalid(row_number, format!("invalid date '{}'", date_text)))?;
    let time_in = parse_time(&time_in_text)
        .ok_or_else(|| invalid(row_number, format!("invalid time_in '{}'", time_in_text)))?;
    let time_out = parse_time(&time_out_text)
        .ok_or_else(|| invalid(row_number, format!("invalid time_out '{}'", time_out_text)))?;
    let lunch_minutes = lunch_minutes(&row.lunch_minutes, policy.default_lunch_minutes, row_number)?;

    let position = row
        .position
        .as_ref()
        .and_then(Cell::as_text)
        .filter(|p| !p.is_empty());

    Ok(TimesheetEntry {
        worker_id,
        date,
        time_in,
        time_out,
        lunch_minutes,
        agency,
        position,
    })
}

/// Validates a batch of rows.
///
/// Invalid rows are skipped and reported; they never abort the batch.
/// A row repeating the worker, date and clock-in time of an earlier row is
/// skipped as a duplicate. Entries whose worked hours exceed the policy's
/// long-shift threshold are kept with a warning.
pub fn ingest_rows(rows: &[TimesheetRow], policy: &RatePolicy) -> IngestReport {
    let mut report = IngestReport::default();
    let mut first_seen: HashMap<(String, NaiveDate, NaiveTime), usize> = HashMap::new();

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        match parse_row(row, row_number, policy) {
            Ok(entry) => {
                let key = (entry.worker_id.clone(), entry.date, entry.time_in);
                if let Some(first) = first_seen.get(&key) {
                    warn!(
                        row = row_number,
                        duplicate_of = first,
                        worker_id = %entry.worker_id,
                        "Skipping duplicate timesheet row"
                    );
                    report.skipped.push(SkippedRow {
                        row: row_number,
                        reason: format!("duplicate of row {}", first),
                    });
                    continue;
                }
                first_seen.insert(key, row_number);

                let hours = entry.daily_hours();
                if hours > policy.long_shift_hours {
                    warn!(
                        row = row_number,
                        worker_id = %entry.worker_id,
                        hours = %hours,
                        "Unusually long shift"
                    );
                    report.warnings.push(IngestWarning {
                        row: row_number,
                        worker_id: entry.worker_id.clone(),
                        message: format!(
                            "{} hours worked on {} exceeds {} hours",
                            hours.round_dp(2),
                            entry.date,
                            policy.long_shift_hours
                        ),
                    });
                }
                report.entries.push(entry);
            }
            Err(EngineError::InvalidRow { row, message }) => {
                warn!(row, reason = %message, "Skipping timesheet row");
                report.skipped.push(SkippedRow { row, reason: message });
            }
            Err(other) => {
                warn!(row = row_number, error = %other, "Skipping timesheet row");
                report.skipped.push(SkippedRow {
                    row: row_number,
                    reason: other.to_string(),
                });
            }
        }
    }

    info!(
        rows = rows.len(),
        entries = report.entries.len(),
        skipped = report.skipped.len(),
        warnings = report.warnings.len(),
        "Ingested timesheet rows"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(worker_id: &str, date: &str, time_in: &str, time_out: &str, agency: &str) -> TimesheetRow {
        TimesheetRow {
            worker_id: Some(Cell::from(worker_id)),
            date: Some(Cell::from(date)),
            time_in: Some(Cell::from(time_in)),
            time_out: Some(Cell::from(time_out)),
            agency: Some(Cell::from(agency)),
            ..TimesheetRow::default()
        }
    }

    #[test]
    fn test_valid_row_uses_default_lunch() {
        let policy = RatePolicy::default();
        let entry = parse_row(&row("W1", "2025-03-03", "08:00", "16:30", "JJ"), 1, &policy).unwrap();

        assert_eq!(entry.lunch_minutes, 30);
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        assert_eq!(entry.position, None);
    }

    #[test]
    fn test_short_us_date_format() {
        let policy = RatePolicy::default();
        let entry = parse_row(&row("W1", "3/4/25", "08:00", "16:30", "JJ"), 1, &policy).unwrap();
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
    }

    #[test]
    fn test_time_with_seconds() {
        assert_eq!(parse_time("07:15:00"), NaiveTime::from_hms_opt(7, 15, 0));
        assert_eq!(parse_time("7am"), None);
    }

    #[test]
    fn test_lunch_as_number_and_text() {
        let policy = RatePolicy::default();
        let mut numeric = row("W1", "2025-03-03", "08:00", "16:30", "JJ");
        numeric.lunch_minutes = Some(Cell::from(45));
        assert_eq!(parse_row(&numeric, 1, &policy).unwrap().lunch_minutes, 45);

        let mut text = row("W1", "2025-03-03", "08:00", "16:30", "JJ");
        text.lunch_minutes = Some(Cell::from(" 0 "));
        assert_eq!(parse_row(&text, 1, &policy).unwrap().lunch_minutes, 0);

        let mut blank = row("W1", "2025-03-03", "08:00", "16:30", "JJ");
        blank.lunch_minutes = Some(Cell::from(""));
        assert_eq!(parse_row(&blank, 1, &policy).unwrap().lunch_minutes, 30);
    }

    #[test]
    fn test_whole_float_lunch_is_accepted() {
        let policy = RatePolicy::default();
        let mut float = row("W1", "2025-03-03", "08:00", "16:30", "JJ");
        float.lunch_minutes = Some(Cell::Number(serde_json::Number::from_f64(30.0).unwrap()));
        assert_eq!(parse_row(&float, 1, &policy).unwrap().lunch_minutes, 30);

        float.lunch_minutes = Some(Cell::from("45.0"));
        assert_eq!(parse_row(&float, 1, &policy).unwrap().lunch_minutes, 45);

        float.lunch_minutes = Some(Cell::from("12.5"));
        assert!(matches!(
            parse_row(&float, 1, &policy),
            Err(EngineError::InvalidRow { .. })
        ));
    }

    #[test]
    fn test_numeric_worker_id_becomes_text() {
        let policy = RatePolicy::default();
        let mut numeric = row("", "2025-03-03", "08:00", "16:30", "JJ");
        numeric.worker_id = Some(Cell::from(1042));
        assert_eq!(parse_row(&numeric, 1, &policy).unwrap().worker_id, "1042");
    }

    #[test]
    fn test_unusable_cells_skip_only_their_row() {
        let policy = RatePolicy::default();
        let mut boolean_agency = row("W2", "2025-03-03", "08:00", "16:30", "JJ");
        boolean_agency.agency = Some(Cell::Other(serde_json::Value::Bool(true)));
        let not_an_object = TimesheetRow::from_value(serde_json::json!(["W3", "2025-03-03"]));

        let rows = vec![
            row("W1", "2025-03-03", "08:00", "16:30", "JJ"),
            boolean_agency,
            not_an_object,
        ];
        let report = ingest_rows(&rows, &policy);

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped[0].reason.contains("agency must be text or a number"));
        assert!(report.skipped[1].reason.contains("an array"));
    }

    #[test]
    fn test_duplicate_rows_are_skipped() {
        let policy = RatePolicy::default();
        let rows = vec![
            row("W1", "2025-03-03", "08:00", "16:30", "JJ"),
            row("W1", "2025-03-03", "08:00", "17:00", "JJ"),
            row("W1", "2025-03-03", "18:00", "22:00", "JJ"),
            row("W2", "2025-03-03", "08:00", "16:30", "JJ"),
            row("W1", "3/3/25", "08:00:00", "16:30", "JJ"),
        ];

        let report = ingest_rows(&rows, &policy);

        assert_eq!(report.entries.len(), 3);
        assert_eq!(
            report.skipped,
            vec![
                SkippedRow {
                    row: 2,
                    reason: "duplicate of row 1".to_string()
                },
                SkippedRow {
                    row: 5,
                    reason: "duplicate of row 1".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_negative_lunch_is_rejected() {
        let policy = RatePolicy::default();
        let mut negative = row("W1", "2025-03-03", "08:00", "16:30", "JJ");
        negative.lunch_minutes = Some(Cell::from(-15));

        match parse_row(&negative, 4, &policy) {
            Err(EngineError::InvalidRow { row, message }) => {
                assert_eq!(row, 4);
                assert!(message.contains("negative"));
            }
            other => panic!("Expected InvalidRow, got {:?}", other),
        }
    }

    #[test]
    fn test_position_is_trimmed_and_blank_dropped() {
        let policy = RatePolicy::default();
        let mut with_role = row("W1", "2025-03-03", "08:00", "16:30", "JJ");
        with_role.position = Some(Cell::from(" Forklift Driver "));
        assert_eq!(
            parse_row(&with_role, 1, &policy).unwrap().position.as_deref(),
            Some("Forklift Driver")
        );

        with_role.position = Some(Cell::from("   "));
        assert_eq!(parse_row(&with_role, 1, &policy).unwrap().position, None);
    }

    #[test]
    fn test_ingest_skips_invalid_rows_and_keeps_going() {
        let policy = RatePolicy::default();
        let rows = vec![
            row("W1", "2025-03-03", "08:00", "16:30", "JJ"),
            row("", "2025-03-03", "08:00", "16:30", "JJ"),
            row("W2", "not a date", "08:00", "16:30", "JJ"),
            row("W3", "2025-03-03", "08:00", "16:30", " "),
            row("W4", "2025-03-03", "22:00", "06:00", "Stride"),
        ];

        let report = ingest_rows(&rows, &policy);

        assert_eq!(report.entries.len(), 2);
        assert_eq!(
            report.skipped.iter().map(|s| s.row).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
        assert!(report.skipped[0].reason.contains("worker_id"));
        assert!(report.skipped[2].reason.contains("agency"));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_long_shift_warns_but_keeps_entry() {
        let policy = RatePolicy::default();
        let rows = vec![row("W1", "2025-03-03", "04:00", "23:00", "JJ")];

        let report = ingest_rows(&rows, &policy);

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].row, 1);
        assert_eq!(report.warnings[0].worker_id, "W1");
    }
}
