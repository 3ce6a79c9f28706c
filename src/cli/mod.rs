//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers work on a
//! [`LedgerContext`] holding the loaded ledger and save it after every
//! successful mutation.

pub mod attendance;
pub mod customer;
pub mod entry;
pub mod export;
pub mod import;
pub mod report;

pub use attendance::{handle_attendance_command, AttendanceArgs};
pub use customer::{handle_customer_command, CustomerCommands};
pub use entry::{handle_entry_command, EntryCommands};
pub use export::{handle_export_command, ExportCommands};
pub use import::{handle_import_command, ImportArgs};
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;

use crate::announce::Announcement;
use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Ledger, Money, PeriodKey, Quantity};
use crate::services::DatePolicy;
use crate::storage::LedgerStore;

/// Everything a command needs: the loaded ledger, where it lives, and the
/// user's settings
pub struct LedgerContext {
    pub store: LedgerStore,
    pub settings: Settings,
    pub ledger: Ledger,
    pub policy: DatePolicy,
}

impl LedgerContext {
    /// Load settings and the ledger; a broken ledger file degrades to the
    /// seeded default
    pub fn open(paths: &LedgerPaths) -> LedgerResult<Self> {
        let settings = Settings::load_or_create(paths)?;
        let store = LedgerStore::new(paths.ledger_file());
        let ledger = store.load();
        Ok(Self {
            store,
            settings,
            ledger,
            policy: DatePolicy::for_today(),
        })
    }

    pub fn save(&self) -> LedgerResult<()> {
        self.store.save(&self.ledger)
    }

    /// Print a status message if announcements are enabled
    pub fn announce(&self, announcement: Announcement) {
        if self.settings.announcements {
            println!("{}", announcement);
        }
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Resolve an optional `--date` against today, enforcing the date lock
    /// unless `backfill` is set
    pub fn editable_date(&self, date: Option<&str>, backfill: bool) -> LedgerResult<NaiveDate> {
        let date = match date {
            Some(raw) => parse_date(raw)?,
            None => self.policy.today(),
        };
        if !backfill {
            if let Err(err) = self.policy.check_editable(date) {
                self.announce(Announcement::DateLocked);
                return Err(err);
            }
        }
        Ok(date)
    }
}

pub(crate) fn parse_date(raw: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", raw))
    })
}

pub(crate) fn parse_money(raw: &str) -> LedgerResult<Money> {
    Money::parse(raw).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid rate '{}'. Use a format like '60' or '60.50'. Error: {}",
            raw, e
        ))
    })
}

pub(crate) fn parse_quantity(raw: &str) -> LedgerResult<Quantity> {
    Quantity::parse(raw).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid quantity '{}'. Use litres like '1' or '1.5'. Error: {}",
            raw, e
        ))
    })
}

/// Parse a period, defaulting to the month containing `today`
pub(crate) fn parse_period(raw: Option<&str>, today: NaiveDate) -> LedgerResult<PeriodKey> {
    match raw {
        Some(raw) => PeriodKey::parse(raw).map_err(|e| {
            LedgerError::Validation(format!(
                "Invalid period: {}. Use YYYY-MM or YYYY-MM-DD",
                e
            ))
        }),
        None => Ok(PeriodKey::month_of(today)),
    }
}
