//! Core data models for the ledger
//!
//! This module contains the data structures of the ledger domain:
//! transactions, categories, money amounts and typed identifiers.

pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use category::Category;
pub use ids::{CategoryId, TransactionId};
pub use money::Money;
pub use transaction::{Transaction, TransactionType};
