//! CLI commands for data export

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_entries_csv, export_full_json, export_full_yaml};

use super::{parse_period, LedgerContext};

/// Full-ledger export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LedgerFormat {
    /// JSON (machine-readable)
    Json,
    /// YAML (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export raw entries to CSV
    Entries {
        /// Output file path
        output: PathBuf,

        /// Only this day (YYYY-MM-DD) or month (YYYY-MM)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Export the whole ledger
    Ledger {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: LedgerFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn create_file(output: &Path) -> LedgerResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Handle export commands
pub fn handle_export_command(ctx: &LedgerContext, cmd: ExportCommands) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Entries { output, period } => {
            let period = period
                .as_deref()
                .map(|raw| parse_period(Some(raw), ctx.policy.today()))
                .transpose()?;

            let count = export_entries_csv(&ctx.ledger, period.as_ref(), create_file(&output)?)?;
            println!("Exported {} entries to: {}", count, output.display());
        }

        ExportCommands::Ledger {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_file(&output)?;
            match format {
                LedgerFormat::Json => export_full_json(&ctx.ledger, &mut writer, pretty)?,
                LedgerFormat::Yaml => export_full_yaml(&ctx.ledger, &mut writer)?,
            }
            std::io::Write::flush(&mut writer)
                .map_err(|e| LedgerError::Export(e.to_string()))?;

            println!(
                "Exported {} customers and {} entries to: {}",
                ctx.ledger.customers.len(),
                ctx.ledger.entries.len(),
                output.display()
            );
        }
    }

    Ok(())
}
