//! Configuration module
//!
//! Path resolution for the settings file and the ledger snapshot, plus user
//! preferences.

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
