//! Date locking policy for interactive edits
//!
//! Only today's sheet may be edited from the normal flow. This is enforced by
//! callers (the CLI), not by the recorder, so imports and deliberate
//! backfills can still write past dates.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};

/// Decides which dates are open for interactive edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePolicy {
    today: NaiveDate,
}

impl DatePolicy {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Policy anchored at the local calendar date
    pub fn for_today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Any date other than today is locked
    pub fn is_locked(&self, date: NaiveDate) -> bool {
        date != self.today
    }

    pub fn check_editable(&self, date: NaiveDate) -> LedgerResult<()> {
        if self.is_locked(date) {
            Err(LedgerError::Locked(date))
        } else {
            Ok(())
        }
    }
}
