//! Core data models
//!
//! Customers, delivery entries, the ledger that owns them, and the fixed-point
//! number types they are built on.

pub mod customer;
pub mod entry;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod period;
pub mod quantity;

pub use customer::{Customer, CustomerValidationError};
pub use entry::Entry;
pub use ids::CustomerId;
pub use ledger::{Ledger, LEDGER_SCHEMA_VERSION};
pub use money::Money;
pub use period::PeriodKey;
pub use quantity::Quantity;
