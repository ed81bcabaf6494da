//! Storage layer for the ledger
//!
//! Defines the persistence boundary the services depend on
//! ([`CategoryStore`], [`TransactionStore`]) and the JSON file repositories
//! that implement it with atomic writes.

pub mod categories;
pub mod file_io;
pub mod transactions;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionRepository;

use crate::audit::AuditLogger;
use crate::config::paths::LedgerPaths;
use crate::error::LedgerResult;
use crate::models::{Category, CategoryId, Transaction, TransactionId};

/// Persistence boundary for categories
pub trait CategoryStore {
    /// Batched lookup of every stored category whose title is in `titles`
    fn find_by_titles(&self, titles: &[String]) -> LedgerResult<Vec<Category>>;

    fn find_by_id(&self, id: CategoryId) -> LedgerResult<Option<Category>>;

    /// All categories, sorted by title
    fn find_all(&self) -> LedgerResult<Vec<Category>>;

    /// Store a batch of new categories as one unit
    ///
    /// Fails with `Duplicate` if any title is already taken (or repeated in
    /// the batch); nothing is stored in that case.
    fn insert_many(&self, categories: Vec<Category>) -> LedgerResult<Vec<Category>>;
}

/// Persistence boundary for transactions
pub trait TransactionStore {
    /// All transactions in the order they were recorded
    fn find_all(&self) -> LedgerResult<Vec<Transaction>>;

    fn find_by_id(&self, id: TransactionId) -> LedgerResult<Option<Transaction>>;

    /// Store a batch of transactions in one persistence call, all or nothing
    fn insert_many(&self, transactions: Vec<Transaction>) -> LedgerResult<Vec<Transaction>>;

    /// Store one transaction after `check` accepts the current rows
    ///
    /// Reading the rows, running the check and writing happen as one unit
    /// with respect to other writers of this store.
    fn insert_checked(
        &self,
        transaction: Transaction,
        check: &dyn Fn(&[Transaction]) -> LedgerResult<()>,
    ) -> LedgerResult<Transaction>;

    /// Remove a transaction, returning it, or `None` if it was absent
    fn remove(&self, id: TransactionId) -> LedgerResult<Option<Transaction>>;
}

/// Main storage coordinator that owns the repositories and the audit log
#[derive(Debug)]
pub struct Storage {
    paths: LedgerPaths,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> LedgerResult<()> {
        self.transactions.load()?;
        self.categories.load()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
        assert_eq!(storage.transactions.count().unwrap(), 0);
        assert_eq!(storage.audit().path(), temp_dir.path().join("audit.log"));
    }
}
