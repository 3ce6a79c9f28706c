//! Daily attendance command
//!
//! Starts from every customer present with their usual quantity and rate,
//! applies the overrides given on the command line and records the sheet in
//! one batch.

use clap::Args;

use crate::announce::Announcement;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CustomerId, Ledger};
use crate::services::{AttendanceSheet, EntryRecorder};

use super::{parse_money, parse_quantity, LedgerContext};

/// Arguments for `milk attendance`
#[derive(Args, Debug, Default)]
pub struct AttendanceArgs {
    /// Date of the sheet (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Allow a date other than today
    #[arg(long)]
    pub backfill: bool,

    /// Customer who did not take milk (repeatable)
    #[arg(short, long, value_name = "CUSTOMER")]
    pub absent: Vec<String>,

    /// Flip a customer's presence after `--absent` is applied (repeatable)
    #[arg(short, long, value_name = "CUSTOMER")]
    pub toggle: Vec<String>,

    /// Quantity override for one customer, e.g. `Gupta=1.5` (repeatable)
    #[arg(short, long, value_name = "CUSTOMER=LITRES")]
    pub qty: Vec<String>,

    /// Rate override for one customer, e.g. `Gupta=55` (repeatable)
    #[arg(short, long, value_name = "CUSTOMER=RATE")]
    pub rate: Vec<String>,
}

fn split_override(raw: &str) -> LedgerResult<(&str, &str)> {
    raw.rsplit_once('=')
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, value)| !name.is_empty() && !value.is_empty())
        .ok_or_else(|| {
            LedgerError::Validation(format!("Invalid override '{}'. Use CUSTOMER=VALUE", raw))
        })
}

fn resolve(ledger: &Ledger, identifier: &str) -> LedgerResult<CustomerId> {
    ledger
        .find_customer(identifier)
        .map(|c| c.id)
        .ok_or_else(|| LedgerError::customer_not_found(identifier))
}

/// Build the sheet for `args` without recording anything
pub fn build_sheet(ledger: &Ledger, args: &AttendanceArgs) -> LedgerResult<AttendanceSheet> {
    let mut sheet = AttendanceSheet::for_ledger(ledger);

    for name in &args.absent {
        sheet.mark_absent(resolve(ledger, name)?)?;
    }
    for name in &args.toggle {
        sheet.toggle(resolve(ledger, name)?)?;
    }
    for raw in &args.qty {
        let (name, value) = split_override(raw)?;
        sheet.set_quantity(resolve(ledger, name)?, parse_quantity(value)?)?;
    }
    for raw in &args.rate {
        let (name, value) = split_override(raw)?;
        sheet.set_rate(resolve(ledger, name)?, parse_money(value)?)?;
    }

    Ok(sheet)
}

/// Handle `milk attendance`
pub fn handle_attendance_command(ctx: &mut LedgerContext, args: AttendanceArgs) -> LedgerResult<()> {
    let date = ctx.editable_date(args.date.as_deref(), args.backfill)?;
    let sheet = build_sheet(&ctx.ledger, &args)?;

    if sheet.all_present() {
        ctx.announce(Announcement::AllMarkedPresent);
    }

    let present = sheet.present();
    if present.is_empty() {
        ctx.announce(Announcement::NoCustomersPresent);
    }

    let outcome = EntryRecorder::new(&mut ctx.ledger).record_daily_attendance(date, &present)?;
    if !outcome.recorded.is_empty() {
        ctx.save()?;
    }

    println!("Attendance for {}", date);
    for entry in &outcome.recorded {
        let name = ctx
            .ledger
            .customer(entry.customer_id)
            .map(|c| c.name.as_str())
            .unwrap_or("?");
        println!(
            "  {:<20} {:>6} L  {}",
            name,
            entry.quantity.to_string(),
            ctx.settings.format_money(entry.total)
        );
    }
    for id in &outcome.duplicates {
        let name = ctx
            .ledger
            .customer(*id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string());
        println!("  {:<20} already recorded, skipped", name);
        ctx.announce(Announcement::DuplicateSkipped { name });
    }
    println!(
        "Recorded {} entries, {} L, {}",
        outcome.recorded.len(),
        outcome.total_quantity(),
        ctx.settings.format_money(outcome.total_amount())
    );

    ctx.announce(Announcement::AttendanceSummary {
        present: outcome.recorded.len(),
        quantity: outcome.total_quantity(),
    });

    Ok(())
}
