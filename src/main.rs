use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger_cli::cli::{
    handle_balance_command, handle_category_command, handle_import_command,
    handle_transaction_command, CategoryCommands, TransactionCommands,
};
use ledger_cli::config::{paths::LedgerPaths, settings::Settings};
use ledger_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Terminal ledger of income and outcome entries",
    long_about = "ledger keeps a running balance of categorized income and outcome \
                  entries. Outcomes can never overdraw the balance, and entries can \
                  be bulk-imported from CSV files."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show configuration
    Config,

    /// Show income, outcome and total
    Balance,

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Category commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Import transactions from a CSV file (title,type,value,category)
    ///
    /// The file is removed once it has been processed.
    Import {
        /// Path to CSV file
        file: String,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing ledger at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'ledger transaction add <title> income <value>' to record income.");
        }
        Some(Commands::Config) => {
            println!("Ledger Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Initialized:      {}", storage.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  CSV delimiter:   '{}'", settings.csv_delimiter);
        }
        Some(Commands::Balance) => {
            handle_balance_command(&storage, &settings)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Import { file }) => {
            handle_import_command(&storage, &settings, &file)?;
        }
        Some(Commands::Audit { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries found.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("ledger - income and outcome ledger");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
