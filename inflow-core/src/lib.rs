//! inflow-core: canonical transaction model, normalization, stats, filtering.

pub mod filter;
pub mod normalize;
pub mod stats;
pub mod transaction;

pub use filter::{TypeFilter, filter_by_date_range, filter_transactions};
pub use normalize::{RawProviderRecord, normalize, normalize_json};
pub use stats::{Stats, compute_stats};
pub use transaction::{NO_DESCRIPTION, Transaction, TxType};
