//! Transaction display formatting
//!
//! Register and detail views for terminal output.

use std::collections::HashMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Category, CategoryId, Transaction};

/// Category titles keyed by id, for labelling transactions
pub fn category_titles(categories: &[Category]) -> HashMap<CategoryId, String> {
    categories
        .iter()
        .map(|c| (c.id, c.title.clone()))
        .collect()
}

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Category")]
    category: String,
}

/// Format a list of transactions as a register table
pub fn format_transaction_register(
    transactions: &[Transaction],
    categories: &HashMap<CategoryId, String>,
    currency_symbol: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| RegisterRow {
        id: txn.id.short(),
        date: txn.created_at.format("%Y-%m-%d").to_string(),
        title: truncate(&txn.title, 30),
        kind: txn.kind.to_string(),
        value: txn.signed_value().format_with_symbol(currency_symbol),
        category: category_label(txn, categories).to_string(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(4), Alignment::right());

    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    categories: &HashMap<CategoryId, String>,
    currency_symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Title:       {}\n", txn.title));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Value:       {}\n",
        txn.value.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("Category:    {}\n", category_label(txn, categories)));
    output.push_str(&format!(
        "Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// One-line summary, used after create/delete
pub fn format_transaction_short(txn: &Transaction, currency_symbol: &str) -> String {
    format!(
        "{} {} {}",
        txn.id.short(),
        txn.title,
        txn.signed_value().format_with_symbol(currency_symbol)
    )
}

fn category_label<'c>(txn: &Transaction, categories: &'c HashMap<CategoryId, String>) -> &'c str {
    txn.category_id
        .and_then(|id| categories.get(&id))
        .map(String::as_str)
        .unwrap_or("(uncategorized)")
}

/// Truncate a string to at most `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};

    #[test]
    fn test_format_register() {
        let food = Category::new("Food");
        let txn = Transaction::new(
            "Lunch",
            TransactionType::Outcome,
            Money::from_cents(2050),
            Some(food.id),
        );
        let pay = Transaction::new("Pay", TransactionType::Income, Money::from_cents(100000), None);

        let formatted =
            format_transaction_register(&[txn.clone(), pay], &category_titles(&[food]), "$");
        assert!(formatted.contains("Lunch"));
        assert!(formatted.contains("-$20.50"));
        assert!(formatted.contains("$1000.00"));
        assert!(formatted.contains("Food"));
        assert!(formatted.contains("(uncategorized)"));
        assert!(formatted.contains(&txn.id.short()));
    }

    #[test]
    fn test_format_empty_register() {
        let formatted = format_transaction_register(&[], &HashMap::new(), "$");
        assert!(formatted.contains("No transactions found"));
    }

    #[test]
    fn test_format_transaction_details() {
        let txn = Transaction::new("Pay", TransactionType::Income, Money::from_cents(500), None);

        let formatted = format_transaction_details(&txn, &HashMap::new(), "€");
        assert!(formatted.contains("Pay"));
        assert!(formatted.contains("income"));
        assert!(formatted.contains("€5.00"));
        assert!(formatted.contains(&txn.id.to_string()));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10), "Short");
        let result = truncate("A very long string", 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with("..."));
    }
}
