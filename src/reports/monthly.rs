//! Monthly report
//!
//! Per-customer litres and billed amount for one calendar month, the basis
//! for the bills sent out at month end.

use std::io::Write;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Customer, CustomerId, Ledger, Money, PeriodKey, Quantity};
use crate::share::BillMessage;

use super::aggregate::{aggregate_by_period, CustomerTotals};

/// One customer's line in the monthly report
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRow {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub mobile: Option<String>,
    /// The customer's rate today, not necessarily the rate billed
    pub current_rate: Money,
    pub totals: CustomerTotals,
    /// What the month's litres would cost at `current_rate`
    pub at_current_rate: Option<Money>,
}

/// Report for a single month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub period: PeriodKey,
    pub owner: String,
    pub rows: Vec<MonthlyRow>,
    pub total_quantity: Quantity,
    pub total_amount: Money,
    pub skipped_orphans: usize,
    pub skipped_overflow: usize,
}

#[derive(Tabled)]
struct MonthlyTableRow {
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Days")]
    days: String,
    #[tabled(rename = "Litres")]
    litres: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "At Rate")]
    at_rate: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl MonthlyReport {
    /// Build the report for a month.
    ///
    /// A day key is widened to its month.
    pub fn generate(ledger: &Ledger, period: &PeriodKey) -> Self {
        let period = match period {
            PeriodKey::Day(date) => PeriodKey::month_of(*date),
            month => *month,
        };
        let totals = aggregate_by_period(&ledger.entries, &ledger.customers, &period);

        let rows = totals
            .rows
            .iter()
            .filter_map(|row| {
                ledger.customer(row.customer_id).map(|c| MonthlyRow {
                    customer_id: c.id,
                    customer_name: c.name.clone(),
                    mobile: c.mobile.clone(),
                    current_rate: c.rate,
                    totals: row.totals,
                    at_current_rate: row.totals.total_quantity.price_at(c.rate),
                })
            })
            .collect();

        Self {
            period,
            owner: ledger.mom_name.clone(),
            rows,
            total_quantity: totals.grand_quantity,
            total_amount: totals.grand_amount,
            skipped_orphans: totals.skipped_orphans,
            skipped_overflow: totals.skipped_overflow,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, customer_id: CustomerId) -> Option<&MonthlyRow> {
        self.rows.iter().find(|r| r.customer_id == customer_id)
    }

    /// The bill for one customer of this report
    ///
    /// # Errors
    ///
    /// `NotFound` if the customer has no entries in the month.
    pub fn bill_for(&self, customer: &Customer) -> LedgerResult<BillMessage> {
        let row = self.row(customer.id).ok_or_else(|| LedgerError::NotFound {
            entity_type: "Entries",
            identifier: format!("{} in {}", customer.name, self.period),
        })?;
        Ok(
            BillMessage::for_customer(customer, self.period.prefix(), &row.totals)
                .signed_by(&self.owner),
        )
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = format!("Monthly Report: {}\n", self.period);

        if self.is_empty() {
            output.push_str("No entries found for this month.\n");
            return output;
        }

        let mut table_rows: Vec<MonthlyTableRow> = self
            .rows
            .iter()
            .map(|r| MonthlyTableRow {
                customer: r.customer_name.clone(),
                days: r.totals.entry_count.to_string(),
                litres: format!("{:.1}", r.totals.total_quantity.as_litres_f64()),
                rate: r.current_rate.format_with_symbol(currency),
                at_rate: r
                    .at_current_rate
                    .map(|m| m.format_with_symbol(currency))
                    .unwrap_or_else(|| "-".to_string()),
                total: r.totals.total_amount.format_with_symbol(currency),
            })
            .collect();
        table_rows.push(MonthlyTableRow {
            customer: "TOTAL".to_string(),
            days: String::new(),
            litres: format!("{:.1}", self.total_quantity.as_litres_f64()),
            rate: String::new(),
            at_rate: String::new(),
            total: self.total_amount.format_with_symbol(currency),
        });

        let table = Table::new(table_rows)
            .with(Style::psql())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        output.push_str(&table);
        output.push('\n');

        if self.skipped_orphans > 0 {
            output.push_str(&format!(
                "({} entries for deleted customers not shown)\n",
                self.skipped_orphans
            ));
        }
        if self.skipped_overflow > 0 {
            output.push_str(&format!(
                "({} entries too large to total, left out)\n",
                self.skipped_overflow
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| LedgerError::Export(e.to_string());

        csv_writer
            .write_record(["Month", "Customer", "Mobile", "Days", "Litres", "Rate", "Total"])
            .map_err(export_err)?;

        let month = self.period.prefix();
        for row in &self.rows {
            let record = [
                month.clone(),
                row.customer_name.clone(),
                row.mobile.clone().unwrap_or_default(),
                row.totals.entry_count.to_string(),
                row.totals.total_quantity.to_string(),
                format!("{:.2}", row.current_rate.as_rupees_f64()),
                format!("{:.2}", row.totals.total_amount.as_rupees_f64()),
            ];
            csv_writer.write_record(&record).map_err(export_err)?;
        }

        let total = [
            month,
            "TOTAL".to_string(),
            String::new(),
            String::new(),
            self.total_quantity.to_string(),
            String::new(),
            format!("{:.2}", self.total_amount.as_rupees_f64()),
        ];
        csv_writer.write_record(&total).map_err(export_err)?;

        csv_writer
            .flush()
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{CustomerService, CustomerUpdate, EntryRecorder};
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn march() -> PeriodKey {
        PeriodKey::month(2024, 3).unwrap()
    }

    fn sample_ledger() -> (Ledger, CustomerId, CustomerId) {
        let mut ledger = Ledger::empty("Menka");
        let a = Customer::new("Gupta", Money::from_rupees(50)).with_mobile("+919876543210");
        let b = Customer::new("Verma", Money::from_rupees(60));
        let (a_id, b_id) = (a.id, b.id);
        ledger.customers.push(a);
        ledger.customers.push(b);

        let mut recorder = EntryRecorder::new(&mut ledger);
        for day in 1..=3 {
            recorder
                .record_entry(date(3, day), a_id, Quantity::from_litres(1), Money::from_rupees(50))
                .unwrap();
        }
        recorder
            .record_entry(date(3, 1), b_id, Quantity::from_ml(500), Money::from_rupees(60))
            .unwrap();
        recorder
            .record_entry(date(4, 1), b_id, Quantity::from_litres(2), Money::from_rupees(60))
            .unwrap();
        (ledger, a_id, b_id)
    }

    #[test]
    fn test_generate() {
        let (ledger, a, b) = sample_ledger();
        let report = MonthlyReport::generate(&ledger, &march());

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.row(a).unwrap().totals.entry_count, 3);
        assert_eq!(report.row(a).unwrap().totals.total_amount, Money::from_rupees(150));
        assert_eq!(report.row(b).unwrap().totals.total_quantity, Quantity::from_ml(500));
        assert_eq!(report.total_quantity, Quantity::from_ml(3500));
        assert_eq!(report.total_amount, Money::from_rupees(180));
    }

    #[test]
    fn test_day_key_widens_to_month() {
        let (ledger, _, _) = sample_ledger();
        let report = MonthlyReport::generate(&ledger, &PeriodKey::day(date(3, 15)));
        assert_eq!(report.period, march());
        assert_eq!(report.total_amount, Money::from_rupees(180));
    }

    #[test]
    fn test_current_rate_is_informational() {
        let (mut ledger, a, _) = sample_ledger();
        CustomerService::new(&mut ledger)
            .update(
                a,
                CustomerUpdate {
                    rate: Some(Money::from_rupees(70)),
                    ..Default::default()
                },
            )
            .unwrap();

        let report = MonthlyReport::generate(&ledger, &march());
        let row = report.row(a).unwrap();
        assert_eq!(row.current_rate, Money::from_rupees(70));
        assert_eq!(row.at_current_rate, Some(Money::from_rupees(210)));
        assert_eq!(row.totals.total_amount, Money::from_rupees(150));
    }

    #[test]
    fn test_bill_for() {
        let (ledger, a, b) = sample_ledger();
        let report = MonthlyReport::generate(&ledger, &march());

        let gupta = ledger.customer(a).unwrap();
        let bill = report.bill_for(gupta).unwrap();
        assert_eq!(bill.total_amount, Money::from_rupees(150));
        assert_eq!(bill.period_label, "2024-03");
        assert!(bill.text().contains("Menka मिल्क सप्लाई"));

        let april = MonthlyReport::generate(&ledger, &PeriodKey::month(2024, 5).unwrap());
        assert!(april.bill_for(ledger.customer(b).unwrap()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_format_terminal() {
        let (ledger, _, _) = sample_ledger();
        let output = MonthlyReport::generate(&ledger, &march()).format_terminal("₹");
        assert!(output.contains("Monthly Report: 2024-03"));
        assert!(output.contains("Verma"));
        assert!(output.contains("₹180.00"));

        let empty = MonthlyReport::generate(&ledger, &PeriodKey::month(2024, 6).unwrap())
            .format_terminal("₹");
        assert!(empty.contains("No entries found"));
    }

    #[test]
    fn test_oversized_entry_is_left_out() {
        let (mut ledger, a, _) = sample_ledger();
        let huge = Quantity::from_ml(i64::MAX - 1000);
        ledger
            .entries
            .push(crate::models::Entry::new(date(3, 20), a, huge, Money::zero()).unwrap());

        let report = MonthlyReport::generate(&ledger, &march());
        assert_eq!(report.skipped_overflow, 1);
        assert_eq!(report.total_amount, Money::from_rupees(180));
        assert!(report
            .format_terminal("₹")
            .contains("(1 entries too large to total, left out)"));
    }

    #[test]
    fn test_export_csv() {
        let (ledger, _, _) = sample_ledger();
        let mut buf = Vec::new();
        MonthlyReport::generate(&ledger, &march())
            .export_csv(&mut buf)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Month,Customer,Mobile,Days,Litres,Rate,Total");
        assert_eq!(lines[1], "2024-03,Gupta,+919876543210,3,3,50.00,150.00");
        assert_eq!(lines[2], "2024-03,Verma,,1,0.5,60.00,30.00");
        assert_eq!(lines[3], "2024-03,TOTAL,,,3.5,,180.00");
    }
}
