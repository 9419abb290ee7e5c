//! Display-side filtering over a transaction snapshot.
//!
//! Filtering is pure and order-preserving: it never mutates its input and
//! always returns a fresh vector, so re-running a filter on the same
//! snapshot is free of side effects.

use chrono::NaiveDate;

use crate::transaction::{Transaction, TxType};

/// Type predicate for the dashboard's type dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TxType),
}

impl TypeFilter {
    /// Parse a dropdown/CLI value: "all" or one of the four type names.
    pub fn parse(s: &str) -> Option<TypeFilter> {
        if s == "all" {
            return Some(TypeFilter::All);
        }
        TxType::parse(s).map(TypeFilter::Only)
    }

    fn matches(&self, tx: &Transaction) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => tx.tx_type == *t,
        }
    }
}

/// Keep transactions whose description contains `search` (case-insensitive,
/// empty matches everything) and whose type passes `type_filter`.
pub fn filter_transactions(
    transactions: &[Transaction],
    search: &str,
    type_filter: TypeFilter,
) -> Vec<Transaction> {
    let needle = search.to_lowercase();
    transactions
        .iter()
        .filter(|tx| tx.description.to_lowercase().contains(&needle))
        .filter(|tx| type_filter.matches(tx))
        .cloned()
        .collect()
}

/// Keep transactions whose date falls inside the inclusive `[from, to]`
/// range. A transaction without a parseable date only passes when no bound
/// is set; both bounds `None` is the identity.
pub fn filter_by_date_range(
    transactions: &[Transaction],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<Transaction> {
    if from.is_none() && to.is_none() {
        return transactions.to_vec();
    }
    transactions
        .iter()
        .filter(|tx| match tx.date_parsed() {
            Some(d) => from.is_none_or(|f| d >= f) && to.is_none_or(|t| d <= t),
            None => false,
        })
        .cloned()
        .collect()
}
