//! CLI command handler for CSV import

use std::path::Path;

use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::services::ImportService;
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(storage: &Storage, settings: &Settings, file: &str) -> LedgerResult<()> {
    let path = Path::new(file);
    if !path.is_file() {
        return Err(LedgerError::Import(format!("File not found: {}", file)));
    }

    let service = ImportService::from_storage(storage).with_delimiter(settings.csv_delimiter_byte()?);
    let result = service.import_file(path)?;

    if result.transactions.is_empty() {
        println!("No valid rows found in {}.", file);
    } else {
        println!("Imported {} transaction(s).", result.transactions.len());
    }
    if result.skipped_rows > 0 {
        println!("Skipped {} incomplete row(s).", result.skipped_rows);
    }
    if !result.source_released {
        eprintln!("Warning: could not remove {}", file);
    }

    Ok(())
}
