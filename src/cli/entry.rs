//! Entry CLI commands
//!
//! Recording a single delivery and listing raw entries.

use clap::Subcommand;

use crate::announce::Announcement;
use crate::display::entry::format_entry_list;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Entry;
use crate::services::EntryRecorder;

use super::{parse_money, parse_period, parse_quantity, LedgerContext};

/// Entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Record one delivery
    Add {
        /// Customer name or ID
        customer: String,
        /// Litres delivered (defaults to the customer's daily quantity)
        #[arg(short, long)]
        qty: Option<String>,
        /// Rate per litre (defaults to the customer's current rate)
        #[arg(short, long)]
        rate: Option<String>,
        /// Delivery date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Allow a date other than today
        #[arg(long)]
        backfill: bool,
    },
    /// List recorded entries
    List {
        /// Only this customer (name or ID)
        #[arg(short, long)]
        customer: Option<String>,
        /// Day (YYYY-MM-DD) or month (YYYY-MM), defaults to this month
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle an entry command
pub fn handle_entry_command(ctx: &mut LedgerContext, cmd: EntryCommands) -> LedgerResult<()> {
    match cmd {
        EntryCommands::Add {
            customer,
            qty,
            rate,
            date,
            backfill,
        } => {
            let date = ctx.editable_date(date.as_deref(), backfill)?;
            let found = ctx
                .ledger
                .find_customer(&customer)
                .ok_or_else(|| LedgerError::customer_not_found(&customer))?;
            let (customer_id, name) = (found.id, found.name.clone());

            let quantity = match qty {
                Some(raw) => parse_quantity(&raw)?,
                None => found.default_qty,
            };
            let rate = match rate {
                Some(raw) => parse_money(&raw)?,
                None => found.rate,
            };

            let result = EntryRecorder::new(&mut ctx.ledger).record_entry(
                date,
                customer_id,
                quantity,
                rate,
            );
            let entry = match result {
                Ok(entry) => entry,
                Err(err @ LedgerError::DuplicateEntry { .. }) => {
                    ctx.announce(Announcement::DuplicateSkipped { name });
                    return Err(err);
                }
                Err(err) => return Err(err),
            };
            ctx.save()?;

            println!(
                "Recorded {} L for {} on {} ({})",
                entry.quantity,
                name,
                entry.date,
                ctx.settings.format_money(entry.total)
            );
            ctx.announce(Announcement::EntryRecorded {
                name: Some(name),
                quantity: entry.quantity,
            });
        }

        EntryCommands::List { customer, period } => {
            let period = parse_period(period.as_deref(), ctx.policy.today())?;
            let customer_id = match customer {
                Some(ident) => Some(
                    ctx.ledger
                        .find_customer(&ident)
                        .ok_or_else(|| LedgerError::customer_not_found(&ident))?
                        .id,
                ),
                None => None,
            };

            let mut entries: Vec<&Entry> = ctx
                .ledger
                .entries_in(&period)
                .filter(|e| customer_id.map_or(true, |id| e.customer_id == id))
                .collect();
            entries.sort_by_key(|e| e.date);

            println!("Entries for {}", period);
            print!("{}", format_entry_list(&entries, &ctx.ledger, ctx.currency()));
            println!();
        }
    }

    Ok(())
}
