//! Service layer
//!
//! Business rules on top of the in-memory ledger: validation, the
//! one-entry-per-customer-per-day rule, cascading deletes and imports.
//! Services never persist; the caller saves the ledger after a successful
//! mutation.

pub mod customer;
pub mod import;
pub mod policy;
pub mod recorder;

pub use customer::{CustomerService, CustomerUpdate, NewCustomer};
pub use import::{import_entries_csv, ImportOutcome, RowProblem};
pub use policy::DatePolicy;
pub use recorder::{AttendanceLine, AttendanceOutcome, AttendanceSheet, EntryRecorder};
