//! The ledger: the whole persisted application state
//!
//! Owns the customer list and the entry list. Entries refer to customers by
//! id only.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::customer::Customer;
use super::entry::Entry;
use super::ids::CustomerId;
use super::money::Money;
use super::period::PeriodKey;

/// Current on-disk schema version
pub const LEDGER_SCHEMA_VERSION: u32 = 1;

/// Owner name used for a freshly seeded ledger
pub const DEFAULT_OWNER_NAME: &str = "Menka";

/// Complete ledger snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Name of the person running the milk round
    pub mom_name: String,

    /// Customers in the order they were added
    #[serde(default)]
    pub customers: Vec<Customer>,

    /// Raw delivery entries in the order they were recorded
    #[serde(default)]
    pub entries: Vec<Entry>,
}

fn default_schema_version() -> u32 {
    LEDGER_SCHEMA_VERSION
}

impl Default for Ledger {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Ledger {
    /// An empty ledger for the given owner
    pub fn empty(owner: impl Into<String>) -> Self {
        Self {
            schema_version: LEDGER_SCHEMA_VERSION,
            mom_name: owner.into(),
            customers: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// The ledger a new installation starts with
    pub fn seeded() -> Self {
        let mut ledger = Self::empty(DEFAULT_OWNER_NAME);
        ledger
            .customers
            .push(Customer::new("ps chahuan", Money::from_rupees(60)));
        ledger
    }

    /// Get a customer by ID
    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub(crate) fn customer_mut(&mut self, id: CustomerId) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|c| c.id == id)
    }

    /// Get a customer by exact name (case-insensitive)
    pub fn customer_by_name(&self, name: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.matches_name(name))
    }

    /// Find a customer by name, full ID, or short display ID (`cus-1a2b3c4d`)
    pub fn find_customer(&self, identifier: &str) -> Option<&Customer> {
        if let Some(customer) = self.customer_by_name(identifier) {
            return Some(customer);
        }

        if let Ok(id) = identifier.parse::<CustomerId>() {
            return self.customer(id);
        }

        let short = identifier.trim().strip_prefix("cus-").unwrap_or(identifier.trim());
        if short.len() < 4 {
            return None;
        }
        let short = short.to_lowercase();
        let mut matches = self
            .customers
            .iter()
            .filter(|c| c.id.as_uuid().to_string().starts_with(&short));
        match (matches.next(), matches.next()) {
            (Some(customer), None) => Some(customer),
            _ => None,
        }
    }

    /// Whether an entry already exists for this customer and date
    pub fn has_entry(&self, customer_id: CustomerId, date: NaiveDate) -> bool {
        self.entries.iter().any(|e| e.is_for(customer_id, date))
    }

    /// All entries for one customer, in recording order
    pub fn entries_for(&self, customer_id: CustomerId) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(move |e| e.customer_id == customer_id)
    }

    /// Entries falling in a day or month, in recording order
    pub fn entries_in<'a>(&'a self, period: &'a PeriodKey) -> impl Iterator<Item = &'a Entry> {
        self.entries.iter().filter(move |e| period.contains(e.date))
    }

    /// Entries whose customer no longer exists
    pub fn orphaned_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(move |e| self.customer(e.customer_id).is_none())
    }

    /// Entries repeating a (customer, date) pair already seen earlier in the
    /// list. Zero for any ledger written through the recorder.
    pub fn duplicate_entries(&self) -> usize {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| !seen.insert((e.customer_id, e.date)))
            .count()
    }

    /// Earliest and latest entry dates
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.entries.iter().map(|e| e.date).min()?;
        let max = self.entries.iter().map(|e| e.date).max()?;
        Some((min, max))
    }
}
