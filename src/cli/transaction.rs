//! Transaction CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::transaction::{
    category_titles, format_transaction_details, format_transaction_register,
    format_transaction_short,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, TransactionType};
use crate::services::{CategoryResolver, CreateTransactionInput, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Transaction title
        title: String,
        /// income or outcome
        kind: String,
        /// Value (e.g., "20" or "20.50")
        value: String,
        /// Category title, created if it does not exist
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List transactions, most recent first
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full or short form)
        id: String,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short form)
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let service = TransactionService::from_storage(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            title,
            kind,
            value,
            category,
        } => {
            let kind = kind
                .parse::<TransactionType>()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;
            let value = Money::parse(&value).map_err(|e| {
                LedgerError::Validation(format!(
                    "Invalid value: '{}'. Use a format like '20' or '20.50'. Error: {}",
                    value, e
                ))
            })?;

            let txn = service.create(CreateTransactionInput {
                title,
                kind,
                value,
                category,
            })?;

            println!("Created transaction: {}", format_transaction_short(&txn, symbol));
        }

        TransactionCommands::List { limit } => {
            let transactions = service.list(Some(limit))?;
            let categories = CategoryResolver::from_storage(storage).list()?;
            print!(
                "{}",
                format_transaction_register(&transactions, &category_titles(&categories), symbol)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| LedgerError::transaction_not_found(&id))?;
            let categories = CategoryResolver::from_storage(storage).list()?;
            print!(
                "{}",
                format_transaction_details(&txn, &category_titles(&categories), symbol)
            );
        }

        TransactionCommands::Delete { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| LedgerError::transaction_not_found(&id))?;
            let deleted = service.delete(txn.id)?;
            println!("Deleted transaction: {}", format_transaction_short(&deleted, symbol));
        }
    }

    Ok(())
}
