//! Canonical transaction record shared by every provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Description used when a provider record carries none.
pub const NO_DESCRIPTION: &str = "No description";

/// Transaction kind as rendered by the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TxType {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "refund")]
    Refund,
    #[serde(rename = "fee")]
    Fee,
    #[serde(rename = "withdrawal")]
    Withdrawal,
}

impl TxType {
    /// Parse a wire/CLI label. Anything else is unrecognized.
    pub fn parse(s: &str) -> Option<TxType> {
        match s {
            "income" => Some(TxType::Income),
            "refund" => Some(TxType::Refund),
            "fee" => Some(TxType::Fee),
            "withdrawal" => Some(TxType::Withdrawal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Refund => "refund",
            TxType::Fee => "fee",
            TxType::Withdrawal => "withdrawal",
        }
    }
}

impl std::fmt::Display for TxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized provider movement.
///
/// `amount` is gross of fees; `net_amount` carries the fee-adjusted value
/// separately so the headline figure matches what the provider reports paid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Calendar date (YYYY-MM-DD), empty when the provider gave none
    pub date: String,
    /// Human-readable description
    pub description: String,
    /// Positive = income, negative = withdrawal
    pub amount: f64,
    /// Amount net of provider fees
    pub net_amount: f64,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    /// Provider wire name, constant per fetch
    pub origin: String,
    /// Provider identifier, stringified; may be empty
    pub id: String,
}

impl Transaction {
    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    /// Parse the date field, if the provider supplied one.
    pub fn date_parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}
