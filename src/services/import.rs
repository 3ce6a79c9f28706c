//! CSV entry import
//!
//! Backfills entries from a CSV file with the columns
//! `date,customer,quantity[,rate]`. Rows go through the entry recorder one by
//! one: a duplicate or a bad row is reported and skipped, every other row is
//! recorded. The date lock does not apply here.

use std::io::Read;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Ledger, Money, Quantity};
use crate::services::EntryRecorder;

/// A raw CSV row before validation
#[derive(Debug, Deserialize)]
struct ImportRow {
    date: String,
    customer: String,
    quantity: String,
    #[serde(default)]
    rate: Option<String>,
}

/// Why a row was not imported
#[derive(Debug, Clone, PartialEq)]
pub enum RowProblem {
    /// The customer already had an entry for that date
    Duplicate { customer: String, date: NaiveDate },
    /// The row could not be parsed or validated
    Invalid(String),
}

/// Summary of an import run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    pub imported: usize,
    /// (1-based data row number, problem)
    pub skipped: Vec<(usize, RowProblem)>,
}

impl ImportOutcome {
    pub fn duplicate_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|(_, p)| matches!(p, RowProblem::Duplicate { .. }))
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.skipped.len() - self.duplicate_count()
    }
}

/// Import entries from CSV data with a header row
pub fn import_entries_csv<R: Read>(ledger: &mut Ledger, reader: R) -> LedgerResult<ImportOutcome> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in ["date", "customer", "quantity"] {
        if !headers.iter().any(|h| h.eq_ignore_ascii_case(required)) {
            return Err(LedgerError::Import(format!(
                "Missing required column '{}'",
                required
            )));
        }
    }
    let lowered: csv::StringRecord = headers.iter().map(|h| h.to_lowercase()).collect();
    csv_reader.set_headers(lowered);

    let mut outcome = ImportOutcome::default();

    for (index, result) in csv_reader.deserialize::<ImportRow>().enumerate() {
        let row_number = index + 1;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                outcome
                    .skipped
                    .push((row_number, RowProblem::Invalid(e.to_string())));
                continue;
            }
        };

        match import_row(ledger, &row) {
            Ok(()) => outcome.imported += 1,
            Err(LedgerError::DuplicateEntry { customer, date }) => {
                outcome
                    .skipped
                    .push((row_number, RowProblem::Duplicate { customer, date }));
            }
            Err(e) => {
                warn!(row = row_number, error = %e, "skipping import row");
                outcome
                    .skipped
                    .push((row_number, RowProblem::Invalid(e.to_string())));
            }
        }
    }

    info!(
        imported = outcome.imported,
        duplicates = outcome.duplicate_count(),
        errors = outcome.error_count(),
        "import finished"
    );
    Ok(outcome)
}

fn import_row(ledger: &mut Ledger, row: &ImportRow) -> LedgerResult<()> {
    let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", row.date))
    })?;

    let customer = ledger
        .find_customer(&row.customer)
        .ok_or_else(|| LedgerError::customer_not_found(&row.customer))?;
    let customer_id = customer.id;
    let current_rate = customer.rate;

    let quantity =
        Quantity::parse(&row.quantity).map_err(|e| LedgerError::Validation(e.to_string()))?;

    let rate = match row.rate.as_deref().filter(|r| !r.is_empty()) {
        Some(raw) => Money::parse(raw).map_err(|e| LedgerError::Validation(e.to_string()))?,
        None => current_rate,
    };

    EntryRecorder::new(ledger).record_entry(date, customer_id, quantity, rate)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    fn ledger() -> Ledger {
        let mut ledger = Ledger::empty("Test");
        ledger
            .customers
            .push(Customer::new("Gupta", Money::from_rupees(50)));
        ledger
            .customers
            .push(Customer::new("Verma", Money::from_rupees(60)));
        ledger
    }

    #[test]
    fn test_import_with_partial_success() {
        let mut ledger = ledger();
        let data = "\
date,customer,quantity,rate
2024-03-01,Gupta,2,50
2024-03-01,verma,1.5,
2024-03-01,Gupta,1,50
2024-03-02,Nobody,1,50
2024-03-02,Gupta,lots,50
2024-03-02,Gupta,1,
";
        let outcome = import_entries_csv(&mut ledger, data.as_bytes()).unwrap();

        assert_eq!(outcome.imported, 3);
        assert_eq!(outcome.duplicate_count(), 1);
        assert_eq!(outcome.error_count(), 2);
        assert_eq!(outcome.skipped[0].0, 3);
        assert_eq!(ledger.entries.len(), 3);

        // Missing rate falls back to the customer's current rate
        assert_eq!(ledger.entries[1].rate, Money::from_rupees(60));
        assert_eq!(ledger.entries[1].total, Money::from_rupees(90));
    }

    #[test]
    fn test_import_accepts_past_dates() {
        let mut ledger = ledger();
        let data = "date,customer,quantity\n2001-01-01,Gupta,1\n";
        let outcome = import_entries_csv(&mut ledger, data.as_bytes()).unwrap();
        assert_eq!(outcome.imported, 1);
    }

    #[test]
    fn test_import_header_case_insensitive() {
        let mut ledger = ledger();
        let data = "Date,Customer,Quantity,Rate\n2024-03-01,Gupta,1,45\n";
        let outcome = import_entries_csv(&mut ledger, data.as_bytes()).unwrap();
        assert_eq!(outcome.imported, 1);
        assert_eq!(ledger.entries[0].rate, Money::from_rupees(45));
    }

    #[test]
    fn test_import_missing_column() {
        let mut ledger = ledger();
        let data = "date,quantity\n2024-03-01,1\n";
        let err = import_entries_csv(&mut ledger, data.as_bytes()).unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));
    }
}
