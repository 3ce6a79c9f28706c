//! YAML export of the full ledger
//!
//! Same structure as the JSON export, for people who want to read it.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::FullExport;
use crate::models::Ledger;

/// Export the full ledger to YAML format
pub fn export_full_yaml<W: Write>(ledger: &Ledger, writer: &mut W) -> LedgerResult<()> {
    let export = FullExport::from_ledger(ledger);
    let export_err = |e: std::io::Error| LedgerError::Export(e.to_string());

    writeln!(writer, "# Milk ledger export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer, "#").map_err(export_err)?;
    writeln!(writer, "# Restore with: milk import <file> --format yaml").map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Read a YAML export back into a ledger
pub fn import_from_yaml(yaml_str: &str) -> LedgerResult<Ledger> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| LedgerError::Import(e.to_string()))?;
    export.validate().map_err(LedgerError::Import)?;
    Ok(export.into_ledger())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Quantity};
    use crate::services::EntryRecorder;
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_export() {
        let mut ledger = Ledger::seeded();
        let id = ledger.customers[0].id;
        EntryRecorder::new(&mut ledger)
            .record_entry(
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                id,
                Quantity::from_ml(1500),
                Money::from_rupees(60),
            )
            .unwrap();

        let mut buf = Vec::new();
        export_full_yaml(&ledger, &mut buf).unwrap();
        let yaml = String::from_utf8(buf).unwrap();

        assert!(yaml.starts_with("# Milk ledger export"));
        assert!(yaml.contains("momName: Menka"));
        assert!(yaml.contains("ps chahuan"));

        let restored = import_from_yaml(&yaml).unwrap();
        assert_eq!(restored.customers, ledger.customers);
        assert_eq!(restored.entries, ledger.entries);
    }

    #[test]
    fn test_yaml_import_rejects_garbage() {
        let err = import_from_yaml("not: [valid").unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));
    }
}
