//! Balance display formatting

use crate::services::Balance;

/// Format the income/outcome/total summary
pub fn format_balance(balance: &Balance, currency_symbol: &str) -> String {
    format!(
        "Income:  {:>14}\nOutcome: {:>14}\n{}\nTotal:   {:>14}\n",
        balance.income.format_with_symbol(currency_symbol),
        balance.outcome.format_with_symbol(currency_symbol),
        "-".repeat(23),
        balance.total.format_with_symbol(currency_symbol),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_format_balance() {
        let balance = Balance {
            income: Money::from_cents(100000),
            outcome: Money::from_cents(2000),
            total: Money::from_cents(98000),
        };

        let formatted = format_balance(&balance, "$");
        assert!(formatted.contains("$1000.00"));
        assert!(formatted.contains("$20.00"));
        assert!(formatted.contains("Total:"));
        assert!(formatted.contains("$980.00"));
    }
}
