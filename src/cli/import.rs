//! CLI command handler for imports
//!
//! CSV files add entries to the current ledger. JSON and YAML files are full
//! exports and replace the ledger after validation.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::error::{LedgerError, LedgerResult};
use crate::export::{import_from_json, import_from_yaml};
use crate::services::{import_entries_csv, RowProblem};

use super::LedgerContext;

/// Import file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportFormat {
    /// Entries as `date,customer,quantity[,rate]`
    Csv,
    /// Full ledger export in JSON
    Json,
    /// Full ledger export in YAML
    Yaml,
}

impl ImportFormat {
    /// Guess the format from a file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Csv,
        }
    }
}

/// Arguments for `milk import`
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// File to import
    pub file: PathBuf,

    /// File format (guessed from the extension when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<ImportFormat>,

    /// Confirm replacing the whole ledger with a JSON/YAML export
    #[arg(long)]
    pub replace: bool,
}

/// Handle the import command
pub fn handle_import_command(ctx: &mut LedgerContext, args: ImportArgs) -> LedgerResult<()> {
    let path = args.file.as_path();
    if !path.exists() {
        return Err(LedgerError::Import(format!(
            "File not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| LedgerError::Import(format!("Failed to read file: {}", e)))?;

    match args.format.unwrap_or_else(|| ImportFormat::from_path(path)) {
        ImportFormat::Csv => import_csv(ctx, &content),
        format => {
            if !args.replace {
                return Err(LedgerError::Validation(
                    "Restoring an export replaces the whole ledger. Pass --replace to confirm"
                        .into(),
                ));
            }
            let ledger = if format == ImportFormat::Json {
                import_from_json(&content)?
            } else {
                import_from_yaml(&content)?
            };
            ctx.ledger = ledger;
            ctx.save()?;

            println!(
                "Restored {} customers and {} entries from: {}",
                ctx.ledger.customers.len(),
                ctx.ledger.entries.len(),
                path.display()
            );
            Ok(())
        }
    }
}

fn import_csv(ctx: &mut LedgerContext, content: &str) -> LedgerResult<()> {
    let outcome = import_entries_csv(&mut ctx.ledger, content.as_bytes())?;
    if outcome.imported > 0 {
        ctx.save()?;
    }

    println!("Import Summary");
    println!("{}", "=".repeat(40));
    println!("  Imported:           {}", outcome.imported);
    println!("  Duplicates (skip):  {}", outcome.duplicate_count());
    println!("  Errors:             {}", outcome.error_count());

    if !outcome.skipped.is_empty() {
        println!();
        for (row, problem) in &outcome.skipped {
            match problem {
                RowProblem::Duplicate { customer, date } => {
                    println!("  Row {}: {} already has an entry on {}", row, customer, date)
                }
                RowProblem::Invalid(reason) => println!("  Row {}: {}", row, reason),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ImportFormat::from_path(Path::new("a.json")), ImportFormat::Json);
        assert_eq!(ImportFormat::from_path(Path::new("a.YML")), ImportFormat::Yaml);
        assert_eq!(ImportFormat::from_path(Path::new("a.csv")), ImportFormat::Csv);
        assert_eq!(ImportFormat::from_path(Path::new("entries")), ImportFormat::Csv);
    }
}
