//! Display formatting for terminal output
//!
//! Plain-text tables for customers and entries. Reports format themselves.

pub mod customer;
pub mod entry;

pub use customer::{format_customer_details, format_customer_list};
pub use entry::format_entry_list;
