//! Export module
//!
//! - CSV: raw entries, in the layout the CSV import reads
//! - JSON: full ledger with metadata, machine-readable
//! - YAML: full ledger with metadata, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_entries_csv;
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
