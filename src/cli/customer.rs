//! Customer CLI commands

use clap::Subcommand;

use crate::announce::Announcement;
use crate::display::customer::{format_customer_details, format_customer_list};
use crate::error::{LedgerError, LedgerResult};
use crate::services::{CustomerService, CustomerUpdate, NewCustomer};

use super::{parse_money, parse_quantity, LedgerContext};

/// Customer subcommands
#[derive(Subcommand)]
pub enum CustomerCommands {
    /// Add a new customer
    Add {
        /// Customer name
        name: String,
        /// Rate per litre (defaults to the configured rate)
        #[arg(short, long)]
        rate: Option<String>,
        /// Litres delivered on a normal day
        #[arg(short, long)]
        qty: Option<String>,
        /// Mobile number for sending bills
        #[arg(short, long)]
        mobile: Option<String>,
    },
    /// List all customers
    List,
    /// Show customer details
    Show {
        /// Customer name or ID
        customer: String,
    },
    /// Edit a customer
    Edit {
        /// Customer name or ID
        customer: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New rate per litre; past entries keep their rate
        #[arg(short, long)]
        rate: Option<String>,
        /// New daily quantity
        #[arg(short, long)]
        qty: Option<String>,
        /// New mobile number
        #[arg(short, long, conflicts_with = "clear_mobile")]
        mobile: Option<String>,
        /// Remove the mobile number
        #[arg(long)]
        clear_mobile: bool,
    },
    /// Delete a customer and all of their entries
    Delete {
        /// Customer name or ID
        customer: String,
    },
}

/// Handle a customer command
pub fn handle_customer_command(ctx: &mut LedgerContext, cmd: CustomerCommands) -> LedgerResult<()> {
    let country_code = ctx.settings.country_code.clone();

    match cmd {
        CustomerCommands::Add {
            name,
            rate,
            qty,
            mobile,
        } => {
            let rate = match rate {
                Some(raw) => parse_money(&raw)?,
                None => ctx.settings.default_rate,
            };
            let default_qty = match qty {
                Some(raw) => parse_quantity(&raw)?,
                None => ctx.settings.default_qty,
            };

            let customer = CustomerService::new(&mut ctx.ledger)
                .with_country_code(country_code)
                .add(NewCustomer {
                    name,
                    mobile,
                    rate,
                    default_qty,
                })?;
            ctx.save()?;

            println!("Added customer: {}", customer.name);
            println!("  Rate: {}/L", ctx.settings.format_money(customer.rate));
            println!("  Daily Quantity: {} L", customer.default_qty);
            if let Some(mobile) = &customer.mobile {
                println!("  Mobile: {}", mobile);
            }
            println!("  ID: {}", customer.id);
            ctx.announce(Announcement::CustomerAdded {
                name: customer.name,
            });
        }

        CustomerCommands::List => {
            print!("{}", format_customer_list(&ctx.ledger.customers, ctx.currency()));
            println!();
        }

        CustomerCommands::Show { customer } => {
            let found = ctx
                .ledger
                .find_customer(&customer)
                .ok_or_else(|| LedgerError::customer_not_found(&customer))?;
            print!(
                "{}",
                format_customer_details(found, &ctx.ledger, ctx.currency())
            );
        }

        CustomerCommands::Edit {
            customer,
            name,
            rate,
            qty,
            mobile,
            clear_mobile,
        } => {
            let update = CustomerUpdate {
                name,
                mobile: if clear_mobile { Some(None) } else { mobile.map(Some) },
                rate: rate.as_deref().map(parse_money).transpose()?,
                default_qty: qty.as_deref().map(parse_quantity).transpose()?,
            };

            if update.is_empty() {
                println!("No changes specified. Use --name, --rate, --qty or --mobile.");
                return Ok(());
            }

            let rate_changed = update.rate;
            let mut service = CustomerService::new(&mut ctx.ledger).with_country_code(country_code);
            let id = service.find(&customer)?.id;
            let updated = service.update(id, update)?;
            ctx.save()?;

            println!("Updated customer: {}", updated.name);
            if let Some(rate) = rate_changed {
                ctx.announce(Announcement::RateChanged { rate });
            }
        }

        CustomerCommands::Delete { customer } => {
            let mut service = CustomerService::new(&mut ctx.ledger);
            let id = service.find(&customer)?.id;
            let (removed, entry_count) = service.delete(id)?;
            ctx.save()?;

            println!(
                "Deleted customer: {} ({} entries removed)",
                removed.name, entry_count
            );
            ctx.announce(Announcement::CustomerDeleted {
                name: Some(removed.name),
            });
        }
    }

    Ok(())
}
