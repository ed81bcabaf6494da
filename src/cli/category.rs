//! Category CLI commands

use clap::Subcommand;

use crate::display::category::format_category_list;
use crate::error::LedgerResult;
use crate::services::CategoryResolver;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> LedgerResult<()> {
    let resolver = CategoryResolver::from_storage(storage);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&resolver.list()?));
        }
    }

    Ok(())
}
