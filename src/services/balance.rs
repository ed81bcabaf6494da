//! Balance calculation
//!
//! The balance is always derived from the full set of stored transactions;
//! there is no separately stored running total to drift out of sync.

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionType};
use crate::storage::TransactionStore;

/// Aggregate income, outcome and total over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub income: Money,
    pub outcome: Money,
    pub total: Money,
}

impl Balance {
    /// Sum a set of transactions (order does not matter; cents are exact)
    ///
    /// Fails with `Validation` if any sum leaves the `i64` cent range.
    pub fn from_transactions(transactions: &[Transaction]) -> LedgerResult<Self> {
        let mut balance = Self::default();
        for txn in transactions {
            let sum = match txn.kind {
                TransactionType::Income => &mut balance.income,
                TransactionType::Outcome => &mut balance.outcome,
            };
            *sum = sum.checked_add(txn.value).ok_or_else(overflow)?;
        }
        balance.total = balance
            .income
            .checked_sub(balance.outcome)
            .ok_or_else(overflow)?;
        Ok(balance)
    }

    /// Whether an outcome of `value` would keep the total non-negative
    pub fn covers(&self, value: Money) -> bool {
        value <= self.total
    }
}

fn overflow() -> LedgerError {
    LedgerError::Validation("Balance exceeds the representable range".into())
}

/// Service computing the current balance from a transaction store
pub struct BalanceService<'a> {
    transactions: &'a dyn TransactionStore,
}

impl<'a> BalanceService<'a> {
    pub fn new(transactions: &'a dyn TransactionStore) -> Self {
        Self { transactions }
    }

    /// Current balance over every stored transaction
    pub fn get_balance(&self) -> LedgerResult<Balance> {
        let transactions = self.transactions.find_all()?;
        Balance::from_transactions(&transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::TransactionRepository;
    use tempfile::TempDir;

    fn txn(kind: TransactionType, value: &str) -> Transaction {
        Transaction::new("t", kind, Money::parse(value).unwrap(), None)
    }

    #[test]
    fn test_empty_set_is_zero() {
        let balance = Balance::from_transactions(&[]).unwrap();
        assert_eq!(balance, Balance::default());
        assert!(balance.total.is_zero());
    }

    #[test]
    fn test_income_minus_outcome_is_total() {
        let transactions = vec![
            txn(TransactionType::Income, "1000"),
            txn(TransactionType::Outcome, "20"),
            txn(TransactionType::Outcome, "0.35"),
            txn(TransactionType::Income, "12.10"),
        ];
        let balance = Balance::from_transactions(&transactions).unwrap();

        assert_eq!(balance.income.cents(), 101210);
        assert_eq!(balance.outcome.cents(), 2035);
        assert_eq!(balance.total, balance.income - balance.outcome);
        assert_eq!(balance.total.cents(), 99175);
    }

    #[test]
    fn test_total_may_be_negative_from_stored_data() {
        // Imported data is trusted, so the derived total can go below zero
        let balance = Balance::from_transactions(&[txn(TransactionType::Outcome, "5")]).unwrap();
        assert_eq!(balance.total.cents(), -500);
        assert!(!balance.covers(Money::from_cents(1)));
        assert!(balance.covers(Money::from_cents(-500)));
    }

    #[test]
    fn test_many_small_values_do_not_drift() {
        let transactions: Vec<_> = (0..10_000)
            .map(|_| txn(TransactionType::Income, "0.01"))
            .collect();
        let balance = Balance::from_transactions(&transactions).unwrap();
        assert_eq!(balance.total.cents(), 10_000);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let big = |kind| Transaction::new("t", kind, Money::from_cents(i64::MAX / 2 + 1), None);

        let err = Balance::from_transactions(&[
            big(TransactionType::Income),
            big(TransactionType::Income),
        ])
        .unwrap_err();
        assert!(err.is_validation());

        let err = Balance::from_transactions(&[
            Transaction::new("t", TransactionType::Outcome, Money::from_cents(i64::MAX), None),
            Transaction::new("t", TransactionType::Outcome, Money::from_cents(i64::MAX), None),
        ])
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_largest_parsed_values_sum_exactly() {
        let transactions: Vec<_> = (0..1000)
            .map(|_| Transaction::new("t", TransactionType::Income, Money::MAX_PARSED, None))
            .collect();
        let balance = Balance::from_transactions(&transactions).unwrap();
        assert_eq!(balance.total.cents(), Money::MAX_PARSED.cents() * 1000);
    }

    #[test]
    fn test_service_reads_store() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo.insert_many(vec![
            txn(TransactionType::Income, "100"),
            txn(TransactionType::Outcome, "40"),
        ])
        .unwrap();

        let balance = BalanceService::new(&repo).get_balance().unwrap();
        assert_eq!(balance.income.cents(), 10000);
        assert_eq!(balance.outcome.cents(), 4000);
        assert_eq!(balance.total.cents(), 6000);
    }
}
