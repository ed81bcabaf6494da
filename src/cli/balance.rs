//! Balance CLI command

use crate::config::settings::Settings;
use crate::display::balance::format_balance;
use crate::error::LedgerResult;
use crate::services::BalanceService;
use crate::storage::Storage;

/// Handle the balance command
pub fn handle_balance_command(storage: &Storage, settings: &Settings) -> LedgerResult<()> {
    let balance = BalanceService::new(&storage.transactions).get_balance()?;
    print!("{}", format_balance(&balance, &settings.currency_symbol));
    Ok(())
}
