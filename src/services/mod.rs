//! Service layer for the ledger
//!
//! Business logic on top of the storage layer. Every service borrows the
//! stores it needs; nothing is looked up globally.

pub mod balance;
pub mod category;
pub mod import;
pub mod transaction;

pub use balance::{Balance, BalanceService};
pub use category::CategoryResolver;
pub use import::{ImportResult, ImportService, ParsedImport, ParsedRow};
pub use transaction::{CreateTransactionInput, TransactionService};
