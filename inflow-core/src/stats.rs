//! Summary statistics over a normalized transaction list.

use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// Dashboard summary figures, recomputed from the full (unfiltered) list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    pub total_income: f64,
    /// Always 0 for now. The dashboard renders the field but no provider
    /// exposes enough history to derive it, so it is intentionally not
    /// computed from data.
    pub monthly_average: f64,
    pub highest_transaction: f64,
    pub transaction_count: usize,
}

/// Compute stats for a snapshot. Safe on the empty slice.
pub fn compute_stats(transactions: &[Transaction]) -> Stats {
    let total_income = transactions
        .iter()
        .filter(|t| t.amount > 0.0)
        .map(|t| t.amount)
        .sum();

    let highest_transaction = transactions
        .iter()
        .map(|t| t.abs_amount())
        .fold(0.0_f64, f64::max);

    Stats {
        total_income,
        monthly_average: 0.0,
        highest_transaction,
        transaction_count: transactions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TxType;

    fn tx(amount: f64) -> Transaction {
        Transaction {
            date: "2024-11-21".to_string(),
            description: "Sale".to_string(),
            amount,
            net_amount: amount,
            tx_type: if amount > 0.0 { TxType::Income } else { TxType::Withdrawal },
            origin: "provider_a".to_string(),
            id: String::new(),
        }
    }

    #[test]
    fn test_empty_list_is_all_zero() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_income, 0.0);
        assert_eq!(stats.highest_transaction, 0.0);
        assert_eq!(stats.transaction_count, 0);
        assert_eq!(stats.monthly_average, 0.0);
    }

    #[test]
    fn test_mixed_amounts() {
        let stats = compute_stats(&[tx(50.0), tx(-20.0), tx(30.0)]);
        assert_eq!(stats.total_income, 80.0);
        assert_eq!(stats.highest_transaction, 50.0);
        assert_eq!(stats.transaction_count, 3);
    }

    #[test]
    fn test_highest_uses_absolute_value() {
        let stats = compute_stats(&[tx(10.0), tx(-75.0)]);
        assert_eq!(stats.highest_transaction, 75.0);
        assert_eq!(stats.total_income, 10.0);
    }

    #[test]
    fn test_monthly_average_stays_zero() {
        let stats = compute_stats(&[tx(100.0), tx(200.0)]);
        assert_eq!(stats.monthly_average, 0.0);
    }
}
