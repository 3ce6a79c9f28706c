//! JSON export of the full ledger
//!
//! Wraps the ledger with export metadata. The same structure is read back
//! when restoring from an export.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Customer, Entry, Ledger, LEDGER_SCHEMA_VERSION};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub mom_name: String,
    pub customers: Vec<Customer>,
    pub entries: Vec<Entry>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub customer_count: usize,
    pub entry_count: usize,
    pub earliest_entry: Option<String>,
    pub latest_entry: Option<String>,
}

impl FullExport {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let range = ledger.date_range();
        let metadata = ExportMetadata {
            customer_count: ledger.customers.len(),
            entry_count: ledger.entries.len(),
            earliest_entry: range.map(|(start, _)| start.to_string()),
            latest_entry: range.map(|(_, end)| end.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            mom_name: ledger.mom_name.clone(),
            customers: ledger.customers.clone(),
            entries: ledger.entries.clone(),
            metadata,
        }
    }

    /// Check the export before it replaces a ledger
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for customer in &self.customers {
            if !ids.insert(customer.id) {
                return Err(format!("Customer {} appears twice", customer.id));
            }
            if !names.insert(Customer::normalize_name(&customer.name)) {
                return Err(format!("Customer name '{}' appears twice", customer.name));
            }
            customer
                .validate()
                .map_err(|e| format!("Customer {}: {}", customer.id, e))?;
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !ids.contains(&entry.customer_id) {
                return Err(format!(
                    "Entry on {} references unknown customer {}",
                    entry.date, entry.customer_id
                ));
            }
            if !seen.insert((entry.customer_id, entry.date)) {
                return Err(format!(
                    "Customer {} has two entries on {}",
                    entry.customer_id, entry.date
                ));
            }
        }

        Ok(())
    }

    pub fn into_ledger(self) -> Ledger {
        Ledger {
            schema_version: LEDGER_SCHEMA_VERSION,
            mom_name: self.mom_name,
            customers: self.customers,
            entries: self.entries,
        }
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(ledger: &Ledger, writer: &mut W, pretty: bool) -> LedgerResult<()> {
    let export = FullExport::from_ledger(ledger);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Read a JSON export back into a ledger
pub fn import_from_json(json_str: &str) -> LedgerResult<Ledger> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| LedgerError::Import(e.to_string()))?;
    export.validate().map_err(LedgerError::Import)?;
    Ok(export.into_ledger())
}
