//! Storage layer
//!
//! A single JSON snapshot per ledger with atomic writes and automatic
//! directory creation.

pub mod file_io;
pub mod store;

pub use store::LedgerStore;
