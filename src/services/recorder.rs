//! Entry recorder
//!
//! Appends delivery entries to the ledger. At most one entry may exist per
//! customer per date; a second attempt is rejected, never merged or
//! overwritten. Every operation validates before it mutates, so a failed call
//! leaves the ledger exactly as it was.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CustomerId, Entry, Ledger, Money, Quantity};

/// Largest quantity a single delivery may record
pub const MAX_ENTRY_QUANTITY: Quantity = Quantity::from_litres(1_000);

/// Largest per-litre rate a delivery may be billed at
pub const MAX_RATE: Money = Money::from_rupees(10_000);

/// One line of the daily attendance sheet
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceLine {
    pub customer_id: CustomerId,
    pub quantity: Quantity,
    pub rate: Money,
    pub present: bool,
}

/// The daily attendance sheet, pre-filled from each customer's defaults
#[derive(Debug, Clone, Default)]
pub struct AttendanceSheet {
    lines: Vec<AttendanceLine>,
}

impl AttendanceSheet {
    /// Every customer present with their default quantity and current rate
    pub fn for_ledger(ledger: &Ledger) -> Self {
        let lines = ledger
            .customers
            .iter()
            .map(|c| AttendanceLine {
                customer_id: c.id,
                quantity: c.default_qty,
                rate: c.rate,
                present: true,
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[AttendanceLine] {
        &self.lines
    }

    fn line_mut(&mut self, id: CustomerId) -> LedgerResult<&mut AttendanceLine> {
        self.lines
            .iter_mut()
            .find(|l| l.customer_id == id)
            .ok_or_else(|| LedgerError::customer_not_found(id.to_string()))
    }

    pub fn mark_absent(&mut self, id: CustomerId) -> LedgerResult<()> {
        self.line_mut(id)?.present = false;
        Ok(())
    }

    /// Flip a customer's presence, returning the new state
    pub fn toggle(&mut self, id: CustomerId) -> LedgerResult<bool> {
        let line = self.line_mut(id)?;
        line.present = !line.present;
        Ok(line.present)
    }

    pub fn all_present(&self) -> bool {
        self.lines.iter().all(|l| l.present)
    }

    pub fn set_quantity(&mut self, id: CustomerId, quantity: Quantity) -> LedgerResult<()> {
        self.line_mut(id)?.quantity = quantity;
        Ok(())
    }

    pub fn set_rate(&mut self, id: CustomerId, rate: Money) -> LedgerResult<()> {
        self.line_mut(id)?.rate = rate;
        Ok(())
    }

    /// Lines marked present
    pub fn present(&self) -> Vec<AttendanceLine> {
        self.lines.iter().filter(|l| l.present).cloned().collect()
    }
}

/// Result of recording a day's attendance
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceOutcome {
    pub date: NaiveDate,
    /// Entries appended to the ledger
    pub recorded: Vec<Entry>,
    /// Customers skipped because they already had an entry for the date
    pub duplicates: Vec<CustomerId>,
}

impl AttendanceOutcome {
    /// Litres recorded by this batch (duplicates excluded)
    pub fn total_quantity(&self) -> Quantity {
        self.recorded.iter().map(|e| e.quantity).sum()
    }

    /// Amount recorded by this batch (duplicates excluded)
    pub fn total_amount(&self) -> Money {
        self.recorded.iter().map(|e| e.total).sum()
    }
}

/// Service that appends entries to a ledger
pub struct EntryRecorder<'a> {
    ledger: &'a mut Ledger,
}

impl<'a> EntryRecorder<'a> {
    pub fn new(ledger: &'a mut Ledger) -> Self {
        Self { ledger }
    }

    /// Record one delivery.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the customer does not exist
    /// - `Validation` for a negative quantity or rate, or one above
    ///   `MAX_ENTRY_QUANTITY` / `MAX_RATE`
    /// - `DuplicateEntry` if the customer already has an entry for `date`
    pub fn record_entry(
        &mut self,
        date: NaiveDate,
        customer_id: CustomerId,
        quantity: Quantity,
        rate: Money,
    ) -> LedgerResult<Entry> {
        let entry = self.prepare(date, customer_id, quantity, rate)?;

        if self.ledger.has_entry(customer_id, date) {
            return Err(self.duplicate_error(customer_id, date));
        }

        info!(
            customer = %customer_id,
            %date,
            quantity = %entry.quantity,
            total = %entry.total,
            "recorded entry"
        );
        self.ledger.entries.push(entry.clone());
        Ok(entry)
    }

    /// Record every present line of a day's sheet.
    ///
    /// All lines are validated first; a bad line fails the whole batch with
    /// nothing written. Customers that already have an entry for the date
    /// (including a repeat within the batch) are skipped and reported in
    /// `duplicates`; everyone else is recorded.
    pub fn record_daily_attendance(
        &mut self,
        date: NaiveDate,
        present: &[AttendanceLine],
    ) -> LedgerResult<AttendanceOutcome> {
        let present: Vec<&AttendanceLine> = present.iter().filter(|l| l.present).collect();
        if present.is_empty() {
            return Err(LedgerError::Validation("No customers present".into()));
        }

        let prepared = present
            .iter()
            .map(|l| self.prepare(date, l.customer_id, l.quantity, l.rate))
            .collect::<LedgerResult<Vec<Entry>>>()?;

        let mut outcome = AttendanceOutcome {
            date,
            recorded: Vec::new(),
            duplicates: Vec::new(),
        };

        for entry in prepared {
            if self.ledger.has_entry(entry.customer_id, date) {
                debug!(customer = %entry.customer_id, %date, "skipping duplicate entry");
                outcome.duplicates.push(entry.customer_id);
                continue;
            }
            self.ledger.entries.push(entry.clone());
            outcome.recorded.push(entry);
        }

        info!(
            %date,
            recorded = outcome.recorded.len(),
            duplicates = outcome.duplicates.len(),
            quantity = %outcome.total_quantity(),
            "recorded daily attendance"
        );
        Ok(outcome)
    }

    /// Validate inputs and build the entry without touching the ledger
    fn prepare(
        &self,
        date: NaiveDate,
        customer_id: CustomerId,
        quantity: Quantity,
        rate: Money,
    ) -> LedgerResult<Entry> {
        let customer = self
            .ledger
            .customer(customer_id)
            .ok_or_else(|| LedgerError::customer_not_found(customer_id.to_string()))?;

        if quantity.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Quantity for {} cannot be negative: {}",
                customer.name, quantity
            )));
        }

        if quantity > MAX_ENTRY_QUANTITY {
            return Err(LedgerError::Validation(format!(
                "Quantity for {} is above the {} L limit: {}",
                customer.name, MAX_ENTRY_QUANTITY, quantity
            )));
        }

        if rate.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Rate for {} cannot be negative: {}",
                customer.name, rate
            )));
        }

        if rate > MAX_RATE {
            return Err(LedgerError::Validation(format!(
                "Rate for {} is above the {} limit: {}",
                customer.name, MAX_RATE, rate
            )));
        }

        Entry::new(date, customer_id, quantity, rate).ok_or_else(|| {
            LedgerError::Validation(format!(
                "Total for {} is too large: {} L at {}",
                customer.name, quantity, rate
            ))
        })
    }

    fn duplicate_error(&self, customer_id: CustomerId, date: NaiveDate) -> LedgerError {
        let customer = self
            .ledger
            .customer(customer_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| customer_id.to_string());
        LedgerError::DuplicateEntry { customer, date }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn ledger_with(names: &[&str]) -> (Ledger, Vec<CustomerId>) {
        let mut ledger = Ledger::empty("Test");
        let ids = names
            .iter()
            .map(|n| {
                let c = Customer::new(*n, Money::from_rupees(50));
                let id = c.id;
                ledger.customers.push(c);
                id
            })
            .collect();
        (ledger, ids)
    }

    #[test]
    fn test_record_entry() {
        let (mut ledger, ids) = ledger_with(&["A"]);
        let entry = EntryRecorder::new(&mut ledger)
            .record_entry(date(1), ids[0], Quantity::from_litres(2), Money::from_rupees(50))
            .unwrap();

        assert_eq!(entry.total, Money::from_rupees(100));
        assert_eq!(ledger.entries.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected_and_ledger_unchanged() {
        let (mut ledger, ids) = ledger_with(&["A"]);
        let mut recorder = EntryRecorder::new(&mut ledger);
        recorder
            .record_entry(date(1), ids[0], Quantity::from_litres(2), Money::from_rupees(50))
            .unwrap();

        let err = recorder
            .record_entry(date(1), ids[0], Quantity::from_litres(5), Money::from_rupees(60))
            .unwrap_err();
        assert!(err.is_duplicate_entry());
        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(ledger.entries[0].quantity, Quantity::from_litres(2));
    }

    #[test]
    fn test_rejects_invalid_input() {
        let (mut ledger, ids) = ledger_with(&["A"]);
        let mut recorder = EntryRecorder::new(&mut ledger);

        assert!(recorder
            .record_entry(date(1), CustomerId::new(), Quantity::from_litres(1), Money::from_rupees(1))
            .unwrap_err()
            .is_not_found());
        assert!(recorder
            .record_entry(date(1), ids[0], Quantity::from_ml(-1), Money::from_rupees(1))
            .unwrap_err()
            .is_validation());
        assert!(recorder
            .record_entry(date(1), ids[0], Quantity::from_litres(1), Money::from_paise(-1))
            .unwrap_err()
            .is_validation());
        assert!(ledger.entries.is_empty());
    }

    #[test]
    fn test_rejects_oversized_quantity_and_rate() {
        let (mut ledger, ids) = ledger_with(&["A"]);
        let mut recorder = EntryRecorder::new(&mut ledger);

        let huge = Quantity::parse("5000000000000000").unwrap();
        assert!(recorder
            .record_entry(date(1), ids[0], huge, Money::zero())
            .unwrap_err()
            .is_validation());
        assert!(recorder
            .record_entry(date(2), ids[0], Quantity::from_litres(1), Money::from_rupees(10_001))
            .unwrap_err()
            .is_validation());

        // The limits themselves are accepted
        recorder
            .record_entry(date(3), ids[0], MAX_ENTRY_QUANTITY, MAX_RATE)
            .unwrap();
        assert_eq!(ledger.entries.len(), 1);
    }

    #[test]
    fn test_zero_quantity_allowed() {
        let (mut ledger, ids) = ledger_with(&["A"]);
        let entry = EntryRecorder::new(&mut ledger)
            .record_entry(date(1), ids[0], Quantity::zero(), Money::from_rupees(50))
            .unwrap();
        assert!(entry.total.is_zero());
    }

    #[test]
    fn test_attendance_partial_success() {
        let (mut ledger, ids) = ledger_with(&["A", "B", "C", "D"]);
        // K = 2 customers already recorded for the day
        EntryRecorder::new(&mut ledger)
            .record_entry(date(1), ids[1], Quantity::from_litres(1), Money::from_rupees(50))
            .unwrap();
        EntryRecorder::new(&mut ledger)
            .record_entry(date(1), ids[3], Quantity::from_litres(1), Money::from_rupees(50))
            .unwrap();

        let sheet = AttendanceSheet::for_ledger(&ledger);
        let outcome = EntryRecorder::new(&mut ledger)
            .record_daily_attendance(date(1), &sheet.present())
            .unwrap();

        assert_eq!(outcome.recorded.len(), 2);
        assert_eq!(outcome.duplicates, vec![ids[1], ids[3]]);
        assert_eq!(ledger.entries.len(), 4);
        assert_eq!(outcome.total_quantity(), Quantity::from_litres(2));
    }

    #[test]
    fn test_attendance_repeat_within_batch() {
        let (mut ledger, ids) = ledger_with(&["A"]);
        let line = AttendanceLine {
            customer_id: ids[0],
            quantity: Quantity::from_litres(1),
            rate: Money::from_rupees(50),
            present: true,
        };
        let outcome = EntryRecorder::new(&mut ledger)
            .record_daily_attendance(date(1), &[line.clone(), line])
            .unwrap();

        assert_eq!(outcome.recorded.len(), 1);
        assert_eq!(outcome.duplicates, vec![ids[0]]);
    }

    #[test]
    fn test_attendance_nobody_present() {
        let (mut ledger, ids) = ledger_with(&["A"]);
        let mut sheet = AttendanceSheet::for_ledger(&ledger);
        sheet.mark_absent(ids[0]).unwrap();

        let err = EntryRecorder::new(&mut ledger)
            .record_daily_attendance(date(1), sheet.lines())
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_attendance_bad_line_writes_nothing() {
        let (mut ledger, ids) = ledger_with(&["A", "B"]);
        let mut sheet = AttendanceSheet::for_ledger(&ledger);
        sheet.set_quantity(ids[1], Quantity::from_ml(-500)).unwrap();

        let err = EntryRecorder::new(&mut ledger)
            .record_daily_attendance(date(1), &sheet.present())
            .unwrap_err();
        assert!(err.is_validation());
        assert!(ledger.entries.is_empty());
    }

    #[test]
    fn test_sheet_edits() {
        let (ledger, ids) = ledger_with(&["A", "B"]);
        let mut sheet = AttendanceSheet::for_ledger(&ledger);

        assert!(sheet.all_present());
        assert!(!sheet.toggle(ids[0]).unwrap());
        assert_eq!(sheet.present().len(), 1);
        assert!(!sheet.all_present());
        assert!(sheet.toggle(ids[0]).unwrap());
        assert!(sheet.all_present());

        sheet.set_rate(ids[1], Money::from_rupees(70)).unwrap();
        assert_eq!(sheet.lines()[1].rate, Money::from_rupees(70));
        assert!(sheet.mark_absent(CustomerId::new()).unwrap_err().is_not_found());
    }
}
