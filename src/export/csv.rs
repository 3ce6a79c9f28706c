//! CSV export of raw entries
//!
//! The column layout matches what `import_entries_csv` reads, so an export
//! can be fed back in.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Ledger, PeriodKey};

/// Export entries to CSV, optionally limited to one period
pub fn export_entries_csv<W: Write>(
    ledger: &Ledger,
    period: Option<&PeriodKey>,
    writer: W,
) -> LedgerResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| LedgerError::Export(e.to_string());

    csv_writer
        .write_record(["date", "customer", "quantity", "rate", "total"])
        .map_err(export_err)?;

    let mut count = 0;
    for entry in ledger
        .entries
        .iter()
        .filter(|e| period.map_or(true, |p| p.contains(e.date)))
    {
        // Entries of deleted customers keep their id so nothing is lost
        let customer = ledger
            .customer(entry.customer_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| entry.customer_id.to_string());

        let record = [
            entry.date_key(),
            customer,
            entry.quantity.to_string(),
            entry.rate.format_plain(),
            entry.total.format_plain(),
        ];
        csv_writer.write_record(&record).map_err(export_err)?;
        count += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Money, Quantity};
    use crate::services::{import_entries_csv, EntryRecorder};
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::empty("Test");
        let gupta = Customer::new("Gupta", Money::from_rupees(50));
        let id = gupta.id;
        ledger.customers.push(gupta);

        let mut recorder = EntryRecorder::new(&mut ledger);
        recorder
            .record_entry(date(3, 1), id, Quantity::from_ml(1500), Money::from_paise(5050))
            .unwrap();
        recorder
            .record_entry(date(4, 1), id, Quantity::from_litres(1), Money::from_rupees(50))
            .unwrap();
        ledger
    }

    #[test]
    fn test_export_entries() {
        let mut buf = Vec::new();
        let count = export_entries_csv(&sample_ledger(), None, &mut buf).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "date,customer,quantity,rate,total");
        assert_eq!(lines[1], "2024-03-01,Gupta,1.5,50.50,75.75");
    }

    #[test]
    fn test_export_period_filter() {
        let march = PeriodKey::month(2024, 3).unwrap();
        let mut buf = Vec::new();
        let count = export_entries_csv(&sample_ledger(), Some(&march), &mut buf).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_export_can_be_imported() {
        let source = sample_ledger();
        let mut buf = Vec::new();
        export_entries_csv(&source, None, &mut buf).unwrap();

        let mut target = Ledger::empty("Test");
        target.customers = source.customers.clone();
        let outcome = import_entries_csv(&mut target, buf.as_slice()).unwrap();

        assert_eq!(outcome.imported, 2);
        assert_eq!(target.entries[0].total, source.entries[0].total);
    }
}
