//! Daily report
//!
//! Litres and amount per customer for one date.

use std::io::Write;

use chrono::NaiveDate;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::announce::Announcement;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CustomerId, Ledger, Money, PeriodKey, Quantity};

use super::aggregate::aggregate_by_period;

/// One customer's deliveries for the day
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRow {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub quantity: Quantity,
    pub amount: Money,
}

/// Report for a single date
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub rows: Vec<DailyRow>,
    pub total_quantity: Quantity,
    pub total_amount: Money,
    pub skipped_orphans: usize,
    pub skipped_overflow: usize,
}

#[derive(Tabled)]
struct DailyTableRow {
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Litres")]
    litres: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl DailyReport {
    /// Build the report for `date`
    pub fn generate(ledger: &Ledger, date: NaiveDate) -> Self {
        let totals = aggregate_by_period(&ledger.entries, &ledger.customers, &PeriodKey::day(date));

        let rows = totals
            .rows
            .iter()
            .filter_map(|row| {
                ledger.customer(row.customer_id).map(|c| DailyRow {
                    customer_id: c.id,
                    customer_name: c.name.clone(),
                    quantity: row.totals.total_quantity,
                    amount: row.totals.total_amount,
                })
            })
            .collect();

        Self {
            date,
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

    /// Status line summarizing the day
    pub fn announcement(&self) -> Announcement {
        if self.is_empty() {
            Announcement::NoEntriesToday
        } else {
            Announcement::DailyTotal {
                quantity: self.total_quantity,
                amount: self.total_amount,
            }
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = format!("Daily Report: {}\n", self.date);

        if self.is_empty() {
            output.push_str("No entries for this date.\n");
            return output;
        }

        let mut table_rows: Vec<DailyTableRow> = self
            .rows
            .iter()
            .map(|r| DailyTableRow {
                customer: r.customer_name.clone(),
                litres: r.quantity.to_string(),
                amount: r.amount.format_with_symbol(currency),
            })
            .collect();
        table_rows.push(DailyTableRow {
            customer: "TOTAL".to_string(),
            litres: self.total_quantity.to_string(),
            amount: self.total_amount.format_with_symbol(currency),
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
            .write_record(["Date", "Customer", "Litres", "Amount"])
            .map_err(export_err)?;

        let date = self.date.to_string();
        for row in &self.rows {
            let record = [
                date.clone(),
                row.customer_name.clone(),
                row.quantity.to_string(),
                format!("{:.2}", row.amount.as_rupees_f64()),
            ];
            csv_writer.write_record(&record).map_err(export_err)?;
        }

        let total = [
            date,
            "TOTAL".to_string(),
            self.total_quantity.to_string(),
            format!("{:.2}", self.total_amount.as_rupees_f64()),
        ];
        csv_writer.write_record(&total).map_err(export_err)?;

        csv_writer
            .flush()
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        Ok(())
    }
}
