//! inflow-providers: fetch orchestration against the payment and bank APIs.

pub mod client;
pub mod error;
pub mod source;

pub use client::{DEFAULT_DAYS, FetchResult, ProviderSet, ProviderSettings, TOKEN_PLACEHOLDER};
pub use error::{ProviderError, ProviderResult};
pub use source::Source;
