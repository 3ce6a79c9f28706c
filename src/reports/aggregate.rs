//! Per-customer totals for a day or a month
//!
//! Totals are built from each entry's stored `quantity` and `total`, never
//! from the customer's current rate, so editing a rate leaves past reports
//! alone. Entries whose customer has been deleted are skipped and counted,
//! as are entries too large to add to the running totals.

use std::collections::HashMap;

use tracing::warn;

use crate::models::{Customer, CustomerId, Entry, Money, PeriodKey, Quantity};

/// Accumulated totals for one customer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomerTotals {
    pub total_quantity: Quantity,
    pub total_amount: Money,
    pub entry_count: usize,
}

impl CustomerTotals {
    /// Totals with `entry` added, `None` if either sum overflows
    fn with_entry(&self, entry: &Entry) -> Option<Self> {
        Some(Self {
            total_quantity: self.total_quantity.checked_add(entry.quantity)?,
            total_amount: self.total_amount.checked_add(entry.total)?,
            entry_count: self.entry_count + 1,
        })
    }
}

/// One customer's line in an aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub customer_id: CustomerId,
    pub totals: CustomerTotals,
}

/// Result of aggregating a period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTotals {
    pub period: PeriodKey,
    /// Customers with at least one entry, in customer-list order
    pub rows: Vec<CustomerRow>,
    pub grand_quantity: Quantity,
    pub grand_amount: Money,
    /// Matching entries whose customer no longer exists
    pub skipped_orphans: usize,
    /// Matching entries left out because adding them would overflow
    pub skipped_overflow: usize,
}

impl PeriodTotals {
    pub fn get(&self, customer_id: CustomerId) -> Option<&CustomerTotals> {
        self.rows
            .iter()
            .find(|r| r.customer_id == customer_id)
            .map(|r| &r.totals)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of entries counted across all customers
    pub fn entry_count(&self) -> usize {
        self.rows.iter().map(|r| r.totals.entry_count).sum()
    }
}

/// Aggregate entries falling in `period` per live customer
pub fn aggregate_by_period(
    entries: &[Entry],
    customers: &[Customer],
    period: &PeriodKey,
) -> PeriodTotals {
    let mut by_customer: HashMap<CustomerId, CustomerTotals> = HashMap::new();
    let mut grand = CustomerTotals::default();
    let mut skipped_orphans = 0;
    let mut skipped_overflow = 0;

    for entry in entries.iter().filter(|e| period.matches_key(&e.date_key())) {
        if !customers.iter().any(|c| c.id == entry.customer_id) {
            skipped_orphans += 1;
            continue;
        }

        let current = by_customer.get(&entry.customer_id).copied().unwrap_or_default();
        match (current.with_entry(entry), grand.with_entry(entry)) {
            (Some(totals), Some(next_grand)) => {
                by_customer.insert(entry.customer_id, totals);
                grand = next_grand;
            }
            _ => {
                warn!(
                    customer = %entry.customer_id,
                    date = %entry.date,
                    quantity = %entry.quantity,
                    "entry too large to add to the period totals, skipped"
                );
                skipped_overflow += 1;
            }
        }
    }

    let rows: Vec<CustomerRow> = customers
        .iter()
        .filter_map(|c| {
            by_customer.get(&c.id).map(|totals| CustomerRow {
                customer_id: c.id,
                totals: *totals,
            })
        })
        .collect();

    PeriodTotals {
        period: *period,
        rows,
        grand_quantity: grand.total_quantity,
        grand_amount: grand.total_amount,
        skipped_orphans,
        skipped_overflow,
    }
}
