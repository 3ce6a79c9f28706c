//! Ledger snapshot store
//!
//! The whole ledger is one JSON document, read once at start-up and rewritten
//! after every mutation. A missing or unreadable document never stops the
//! application: `load` falls back to the seeded default ledger and moves the
//! bad file aside so it can be inspected later.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Ledger, LEDGER_SCHEMA_VERSION};

use super::file_io::{read_json_optional, write_json_atomic};

/// Atomic snapshot store for the ledger
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a snapshot has been written yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the ledger, degrading to the seeded default on any failure
    pub fn load(&self) -> Ledger {
        match self.try_load() {
            Ok(Some(ledger)) => {
                let orphans = ledger.orphaned_entries().count();
                if orphans > 0 {
                    warn!(orphans, "ledger has entries for deleted customers");
                }
                let duplicates = ledger.duplicate_entries();
                if duplicates > 0 {
                    warn!(
                        duplicates,
                        "ledger has more than one entry for a customer on the same day"
                    );
                }
                debug!(
                    path = %self.path.display(),
                    customers = ledger.customers.len(),
                    entries = ledger.entries.len(),
                    "loaded ledger"
                );
                ledger
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "no ledger on disk, using seeded default");
                Ledger::seeded()
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unreadable ledger, using seeded default");
                self.quarantine();
                Ledger::seeded()
            }
        }
    }

    /// Load the ledger, surfacing parse and version errors
    pub fn try_load(&self) -> LedgerResult<Option<Ledger>> {
        let ledger: Option<Ledger> = read_json_optional(&self.path)?;

        match ledger {
            Some(ledger) if ledger.schema_version > LEDGER_SCHEMA_VERSION => {
                Err(LedgerError::Storage(format!(
                    "Ledger schema version {} is newer than supported version {}",
                    ledger.schema_version, LEDGER_SCHEMA_VERSION
                )))
            }
            other => Ok(other),
        }
    }

    /// Persist a full snapshot
    pub fn save(&self, ledger: &Ledger) -> LedgerResult<()> {
        write_json_atomic(&self.path, ledger)?;
        debug!(
            path = %self.path.display(),
            customers = ledger.customers.len(),
            entries = ledger.entries.len(),
            "saved ledger"
        );
        Ok(())
    }

    /// Path a corrupt snapshot is moved to
    fn quarantine_path(&self) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%d%H%M%S");
        self.path.with_extension(format!("corrupt-{}.json", stamp))
    }

    fn quarantine(&self) {
        if !self.path.exists() {
            return;
        }
        let target = self.quarantine_path();
        match fs::rename(&self.path, &target) {
            Ok(()) => warn!(moved_to = %target.display(), "kept a copy of the unreadable ledger"),
            Err(err) => warn!(error = %err, "could not move the unreadable ledger aside"),
        }
    }
}
