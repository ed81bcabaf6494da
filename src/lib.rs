//! ledger-cli - a terminal ledger of categorized income and outcome entries
//!
//! Transactions carry a title, a type (`income` or `outcome`), a non-negative
//! value and an optional category. Categories are created on first use and
//! shared by title. The running balance is always derived from the stored
//! transactions, and a new outcome may never take it below zero.
//!
//! # Architecture
//!
//! - `config`: data directory and settings
//! - `error`: crate error type
//! - `models`: money, ids, transactions and categories
//! - `storage`: store traits and their JSON file repositories
//! - `audit`: append-only audit log
//! - `services`: balance, category resolution, create/delete, CSV import
//! - `display` and `cli`: terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger_cli::config::paths::LedgerPaths;
//! use ledger_cli::services::BalanceService;
//! use ledger_cli::storage::Storage;
//!
//! let mut storage = Storage::new(LedgerPaths::new()?)?;
//! storage.load_all()?;
//! let balance = BalanceService::new(&storage.transactions).get_balance()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
