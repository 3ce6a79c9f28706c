//! Milk Ledger - daily milk delivery accounts
//!
//! A small ledger for someone who delivers milk to a handful of households:
//! who got how many litres on which day at what rate, totals per day and per
//! month, and the monthly bill for each customer.
//!
//! # Architecture
//!
//! - `models`: customers, entries, the ledger and fixed-point money/quantity
//! - `storage`: the ledger as one atomically written JSON snapshot
//! - `services`: customer management, entry recording, date policy, imports
//! - `reports`: per-period aggregation plus daily and monthly reports
//! - `announce`: status messages shown after each action
//! - `share`: monthly bill text and share link
//! - `export`, `display`, `cli`: file formats, terminal output, commands
//!
//! # Example
//!
//! ```rust,ignore
//! use milk_ledger::config::LedgerPaths;
//! use milk_ledger::storage::LedgerStore;
//!
//! let paths = LedgerPaths::new()?;
//! let ledger = LedgerStore::new(paths.ledger_file()).load();
//! ```

pub mod announce;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod share;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
