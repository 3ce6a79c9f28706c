//! CLI commands for reports
//!
//! Daily and monthly summaries, plus the monthly bill link for a customer.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::reports::{DailyReport, MonthlyReport};

use super::{parse_date, parse_period, LedgerContext};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Litres and amount per customer for one day
    #[command(alias = "today")]
    Daily {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Per-customer totals for a month
    Monthly {
        /// Month (e.g. "2024-03"), defaults to this month
        #[arg(short, long)]
        period: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a customer's monthly bill and a link to send it
    Share {
        /// Customer name or ID
        customer: String,

        /// Month (e.g. "2024-03"), defaults to this month
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle report commands
pub fn handle_report_command(ctx: &LedgerContext, cmd: ReportCommands) -> LedgerResult<()> {
    match cmd {
        ReportCommands::Daily { date, output } => handle_daily_report(ctx, date, output),
        ReportCommands::Monthly { period, output } => handle_monthly_report(ctx, period, output),
        ReportCommands::Share { customer, period } => handle_share(ctx, customer, period),
    }
}

fn create_output(path: &Path) -> LedgerResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn handle_daily_report(
    ctx: &LedgerContext,
    date: Option<String>,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    let date = match date {
        Some(raw) => parse_date(&raw)?,
        None => ctx.policy.today(),
    };

    let report = DailyReport::generate(&ctx.ledger, date);

    if let Some(path) = output {
        report.export_csv(create_output(&path)?)?;
        println!("Daily report exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal(ctx.currency()));
    }

    if date == ctx.policy.today() {
        ctx.announce(report.announcement());
    }

    Ok(())
}

fn handle_monthly_report(
    ctx: &LedgerContext,
    period: Option<String>,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    let period = parse_period(period.as_deref(), ctx.policy.today())?;
    let report = MonthlyReport::generate(&ctx.ledger, &period);

    if let Some(path) = output {
        report.export_csv(create_output(&path)?)?;
        println!("Monthly report exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal(ctx.currency()));
    }

    Ok(())
}

fn handle_share(ctx: &LedgerContext, customer: String, period: Option<String>) -> LedgerResult<()> {
    let period = parse_period(period.as_deref(), ctx.policy.today())?;
    let found = ctx
        .ledger
        .find_customer(&customer)
        .ok_or_else(|| LedgerError::customer_not_found(&customer))?;

    let report = MonthlyReport::generate(&ctx.ledger, &period);
    let bill = report.bill_for(found)?;

    println!("{}", bill.text());
    println!();
    println!("{}", bill.share_link()?);

    Ok(())
}
