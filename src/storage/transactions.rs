//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json. Every
//! mutation writes the full file atomically before it becomes visible in
//! memory, so a failed write leaves both unchanged.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::TransactionStore;

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
///
/// Rows are kept in insertion order, which is the order they were recorded.
#[derive(Debug)]
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire write lock: {}", e)))?;

        *data = file_data.transactions;
        Ok(())
    }

    /// Count transactions
    pub fn count(&self) -> LedgerResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }

    fn persist(&self, transactions: Vec<Transaction>) -> LedgerResult<Vec<Transaction>> {
        let file_data = TransactionData { transactions };
        write_json_atomic(&self.path, &file_data)?;
        Ok(file_data.transactions)
    }

    fn validate_batch(existing: &[Transaction], batch: &[Transaction]) -> LedgerResult<()> {
        let mut ids: HashSet<TransactionId> = existing.iter().map(|t| t.id).collect();
        for txn in batch {
            txn.validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;
            if !ids.insert(txn.id) {
                return Err(LedgerError::Duplicate {
                    entity_type: "Transaction",
                    identifier: txn.id.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl TransactionStore for TransactionRepository {
    fn find_all(&self) -> LedgerResult<Vec<Transaction>> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    fn find_by_id(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|t| t.id == id).cloned())
    }

    fn insert_many(&self, transactions: Vec<Transaction>) -> LedgerResult<Vec<Transaction>> {
        if transactions.is_empty() {
            return Ok(transactions);
        }

        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire write lock: {}", e)))?;

        Self::validate_batch(&data, &transactions)?;

        let mut next = data.clone();
        next.extend(transactions.iter().cloned());
        *data = self.persist(next)?;

        Ok(transactions)
    }

    fn insert_checked(
        &self,
        transaction: Transaction,
        check: &dyn Fn(&[Transaction]) -> LedgerResult<()>,
    ) -> LedgerResult<Transaction> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire write lock: {}", e)))?;

        // Runs under the write lock: no other writer can slip in between
        check(&data)?;
        Self::validate_batch(&data, std::slice::from_ref(&transaction))?;

        let mut next = data.clone();
        next.push(transaction.clone());
        *data = self.persist(next)?;

        Ok(transaction)
    }

    fn remove(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire write lock: {}", e)))?;

        let Some(index) = data.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        let mut next = data.clone();
        let removed = next.remove(index);
        *data = self.persist(next)?;

        Ok(Some(removed))
    }
}
