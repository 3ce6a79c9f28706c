use anyhow::Result;
use clap::{Parser, Subcommand};

use milk_ledger::announce::Announcement;
use milk_ledger::cli::{
    handle_attendance_command, handle_customer_command, handle_entry_command,
    handle_export_command, handle_import_command, handle_report_command, AttendanceArgs,
    CustomerCommands, EntryCommands, ExportCommands, ImportArgs, LedgerContext, ReportCommands,
};
use milk_ledger::config::LedgerPaths;

#[derive(Parser)]
#[command(
    name = "milk",
    version,
    about = "Daily milk delivery ledger",
    long_about = "Keeps track of the milk delivered to each customer every day, \
                  totals it by day or month, and prepares monthly bills."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the ledger
    Init {
        /// Name of the person running the milk round
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// Show current configuration and paths
    Config,

    /// Customer management commands
    #[command(subcommand)]
    Customer(CustomerCommands),

    /// Record or list deliveries
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Record today's deliveries for every customer at once
    Attendance(AttendanceArgs),

    /// Daily and monthly reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export entries or the whole ledger
    #[command(subcommand)]
    Export(ExportCommands),

    /// Import entries from CSV or restore a ledger export
    Import(ImportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    milk_ledger::logging::init(cli.verbose);

    let paths = LedgerPaths::new()?;
    let mut ctx = LedgerContext::open(&paths)?;

    match cli.command {
        Some(Commands::Init { owner }) => {
            println!("Initializing milk ledger at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            ctx.settings.save(&paths)?;

            if let Some(owner) = owner {
                let owner = owner.trim();
                if !owner.is_empty() {
                    ctx.ledger.mom_name = owner.to_string();
                }
            }
            ctx.save()?;

            println!("Initialization complete!");
            println!("  Ledger file: {}", ctx.store.path().display());
            println!("  Customers:   {}", ctx.ledger.customers.len());
            println!();
            println!("Run 'milk customer add <NAME> --rate <RATE>' to add customers.");
            ctx.announce(Announcement::Welcome {
                owner: ctx.ledger.mom_name.clone(),
            });
        }
        Some(Commands::Config) => {
            let settings = &ctx.settings;
            println!("Milk Ledger Configuration");
            println!("=========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Ledger file:    {}", paths.ledger_file().display());
            println!("Initialized:    {}", if paths.is_initialized() { "Yes" } else { "No" });
            println!();
            println!("Owner:          {}", ctx.ledger.mom_name);
            println!("Settings:");
            println!("  Currency:       {}", settings.currency_symbol);
            println!("  Default rate:   {}", settings.format_money(settings.default_rate));
            println!("  Default qty:    {} L", settings.default_qty);
            println!("  Country code:   {}", settings.country_code);
            println!(
                "  Announcements:  {}",
                if settings.announcements { "On" } else { "Off" }
            );
        }
        Some(Commands::Customer(cmd)) => handle_customer_command(&mut ctx, cmd)?,
        Some(Commands::Entry(cmd)) => handle_entry_command(&mut ctx, cmd)?,
        Some(Commands::Attendance(args)) => handle_attendance_command(&mut ctx, args)?,
        Some(Commands::Report(cmd)) => handle_report_command(&ctx, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&ctx, cmd)?,
        Some(Commands::Import(args)) => handle_import_command(&mut ctx, args)?,
        None => {
            println!("Milk Ledger - daily milk delivery accounts");
            println!();
            println!("Run 'milk --help' for usage information.");
            println!("Run 'milk init' to get started.");
        }
    }

    Ok(())
}
