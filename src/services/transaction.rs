//! Transaction service
//!
//! Creates and deletes single transactions. Creation guards the running
//! total: an outcome larger than the current balance is rejected.

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionId, TransactionType};
use crate::storage::{CategoryStore, Storage, TransactionStore};

use super::balance::Balance;
use super::category::CategoryResolver;

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub title: String,
    pub kind: TransactionType,
    pub value: Money,
    /// Category title; created on first use. `None` or blank leaves it unset.
    pub category: Option<String>,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    transactions: &'a dyn TransactionStore,
    categories: &'a dyn CategoryStore,
    audit: Option<&'a AuditLogger>,
}

impl<'a> TransactionService<'a> {
    pub fn new(
        transactions: &'a dyn TransactionStore,
        categories: &'a dyn CategoryStore,
    ) -> Self {
        Self {
            transactions,
            categories,
            audit: None,
        }
    }

    /// Record creates and deletes in the audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Service over the default file-backed storage
    pub fn from_storage(storage: &'a Storage) -> Self {
        Self::new(&storage.transactions, &storage.categories).with_audit(storage.audit())
    }

    /// Create a new transaction
    ///
    /// For outcomes the balance is checked before the category is resolved,
    /// so a rejected outcome never creates a category. The check is repeated
    /// atomically with the insert to close the window between the two.
    pub fn create(&self, input: CreateTransactionInput) -> LedgerResult<Transaction> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(LedgerError::Validation(
                "Transaction title cannot be empty".into(),
            ));
        }
        if input.value.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Transaction value cannot be negative: {}",
                input.value
            )));
        }

        if input.kind == TransactionType::Outcome {
            let current = Balance::from_transactions(&self.transactions.find_all()?)?;
            ensure_covers(&current, input.value)?;
        }

        let category_id = match input.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => {
                let mut resolver = CategoryResolver::new(self.categories);
                if let Some(audit) = self.audit {
                    resolver = resolver.with_audit(audit);
                }
                Some(resolver.resolve_one(category)?.id)
            }
            _ => None,
        };

        let txn = Transaction::new(title, input.kind, input.value, category_id);
        txn.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let txn = match txn.kind {
            TransactionType::Outcome => {
                let value = txn.value;
                self.transactions.insert_checked(txn, &|rows| {
                    ensure_covers(&Balance::from_transactions(rows)?, value)
                })?
            }
            TransactionType::Income => self
                .transactions
                .insert_many(vec![txn])?
                .pop()
                .ok_or_else(|| LedgerError::Persistence("Insert returned no rows".into()))?,
        };

        if let Some(audit) = self.audit {
            audit.log_committed(&[AuditEntry::create(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.title.clone()),
                &txn,
            )]);
        }

        Ok(txn)
    }

    /// Delete a transaction, returning the removed record
    ///
    /// The referenced category is left in place.
    pub fn delete(&self, id: TransactionId) -> LedgerResult<Transaction> {
        let txn = self
            .transactions
            .remove(id)?
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        if let Some(audit) = self.audit {
            audit.log_committed(&[AuditEntry::delete(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.title.clone()),
                &txn,
            )]);
        }

        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        self.transactions.find_by_id(id)
    }

    /// Find a transaction by full ID or by the short `txn-xxxxxxxx` form
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.transactions.find_by_id(id);
        }

        let identifier = identifier.trim();
        let matches: Vec<_> = self
            .transactions
            .find_all()?
            .into_iter()
            .filter(|t| t.id.short() == identifier)
            .collect();

        match matches.len() {
            0 | 1 => Ok(matches.into_iter().next()),
            _ => Err(LedgerError::Validation(format!(
                "Identifier '{}' is ambiguous, use the full ID",
                identifier
            ))),
        }
    }

    /// List transactions, most recent first
    pub fn list(&self, limit: Option<usize>) -> LedgerResult<Vec<Transaction>> {
        let mut transactions = self.transactions.find_all()?;
        transactions.reverse();

        if let Some(limit) = limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }
}

fn ensure_covers(balance: &Balance, value: Money) -> LedgerResult<()> {
    if balance.covers(value) {
        Ok(())
    } else {
        Err(LedgerError::InvalidOutcome {
            value,
            total: balance.total,
        })
    }
}
