//! Reports
//!
//! Daily and monthly summaries built on top of [`aggregate_by_period`]. Each
//! report formats itself for the terminal and exports to CSV.

pub mod aggregate;
pub mod daily;
pub mod monthly;

pub use aggregate::{aggregate_by_period, CustomerRow, CustomerTotals, PeriodTotals};
pub use daily::{DailyReport, DailyRow};
pub use monthly::{MonthlyReport, MonthlyRow};
