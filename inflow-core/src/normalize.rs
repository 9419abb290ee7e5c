//! Map one raw provider record to one canonical [`Transaction`].
//!
//! Provider payloads are collaborator-owned and arrive in whatever shape the
//! upstream API felt like that day. Normalization therefore never fails:
//! every field is decoded leniently (amounts may arrive as numeric strings,
//! ids as numbers), every absent or wrong-shaped value degrades to a
//! documented fallback, and a record that is not even an object collapses
//! to the all-fallback transaction instead of aborting the fetch.

use serde::Deserialize;
use serde_json::Value;

use crate::transaction::{NO_DESCRIPTION, Transaction, TxType};

/// Raw provider record, deserialized tolerantly. Every field is kept as a
/// raw JSON value so a wrong-shaped one degrades during coercion rather
/// than failing the decode. Unknown fields are ignored; the
/// `monto`/`tipo`/`fecha`/`descripcion` overrides are the pre-normalized
/// fields some providers already carry on the wire.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawProviderRecord {
    pub id: Option<Value>,
    pub description: Option<Value>,
    pub date_created: Option<Value>,
    pub transaction_amount: Option<Value>,
    pub total_paid_amount: Option<Value>,
    /// Ordered sequence of fee objects, each with an `amount`
    pub fee_details: Option<Value>,

    // Pre-normalized overrides
    #[serde(rename = "monto")]
    pub amount_override: Option<Value>,
    #[serde(rename = "tipo")]
    pub type_override: Option<Value>,
    #[serde(rename = "fecha")]
    pub date_override: Option<Value>,
    #[serde(rename = "descripcion")]
    pub description_override: Option<Value>,
}

/// Lenient numeric coercion: numbers pass through, numeric strings parse,
/// everything else is 0.
fn coerce_number(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// A numeric field: `None` when absent or null (so the fallback chain can
/// continue), otherwise the coerced value.
fn numeric_field(v: &Option<Value>) -> Option<f64> {
    match v {
        None | Some(Value::Null) => None,
        Some(v) => Some(coerce_number(v)),
    }
}

/// A text field: strings kept, scalar values formatted, composites and null
/// treated as absent.
fn string_field(v: &Option<Value>) -> Option<String> {
    match v {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}

/// String coercion for provider ids: strings kept, numbers formatted,
/// anything else becomes empty.
fn coerce_id(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Sum of the `amount` entries inside `fee_details`; a wrong-shaped list
/// or entry contributes 0.
fn total_fees(fee_details: &Option<Value>) -> f64 {
    fee_details
        .as_ref()
        .and_then(Value::as_array)
        .map(|fees| {
            fees.iter()
                .map(|fee| fee.get("amount").map(coerce_number).unwrap_or(0.0))
                .sum()
        })
        .unwrap_or(0.0)
}

/// Normalize one raw record. `origin` is the provider wire name and is
/// stamped on the output unchanged.
///
/// The gross amount (`total_paid_amount`) is preferred over the pre-fee
/// `transaction_amount` because the latter does not reflect all fee
/// structures. The fee-adjusted value is emitted as `net_amount` while the
/// headline `amount` stays gross, matching what the dashboard has always
/// displayed.
pub fn normalize(raw: &RawProviderRecord, origin: &str) -> Transaction {
    let total_amount = numeric_field(&raw.total_paid_amount)
        .or_else(|| numeric_field(&raw.transaction_amount))
        .unwrap_or(0.0);

    let total_fee = total_fees(&raw.fee_details);
    let net_amount = total_amount - total_fee;

    let amount = numeric_field(&raw.amount_override).unwrap_or(total_amount);

    let tx_type = string_field(&raw.type_override)
        .as_deref()
        .and_then(TxType::parse)
        .unwrap_or(if total_amount > 0.0 {
            TxType::Income
        } else {
            TxType::Withdrawal
        });

    let date = string_field(&raw.date_override).unwrap_or_else(|| {
        string_field(&raw.date_created)
            .map(|d| d.chars().take(10).collect())
            .unwrap_or_default()
    });

    let description = string_field(&raw.description_override)
        .or_else(|| string_field(&raw.description))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let id = raw.id.as_ref().map(coerce_id).unwrap_or_default();

    Transaction {
        date,
        description,
        amount,
        net_amount,
        tx_type,
        origin: origin.to_string(),
        id,
    }
}

/// Normalize a raw JSON value directly. A record that is not an object
/// degrades to the all-fallback transaction, so one malformed entry in a
/// provider response never poisons the rest of the fetch.
pub fn normalize_json(value: &Value, origin: &str) -> Transaction {
    let raw: RawProviderRecord = serde_json::from_value(value.clone()).unwrap_or_default();
    normalize(&raw, origin)
}
