//! Fetch-level error taxonomy.
//!
//! `Display` on every variant is safe to forward to a browser: collaborator
//! failures keep their detail (HTTP status, response body, transport error)
//! out of the message and are logged at the failure site instead. The
//! credential itself never appears anywhere.

use thiserror::Error;

use crate::source::Source;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Credential missing or still set to the shipped placeholder.
    #[error("{0} credential is not configured")]
    MissingCredential(Source),

    /// Provider call failed; the detail string is for operator logs only.
    #[error("failed to fetch data from {0}")]
    Collaborator(Source, String),

    /// Request named a source the API does not know.
    #[error("unknown source: {0}")]
    UnknownSource(String),

    /// The caller abandoned the fetch.
    #[error("fetch cancelled")]
    Cancelled,
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_message_hides_detail() {
        let err = ProviderError::Collaborator(
            Source::ProviderA,
            "401 Unauthorized: {\"message\":\"invalid token TOKEN-123\"}".to_string(),
        );
        let msg = err.to_string();
        assert_eq!(msg, "failed to fetch data from provider_a");
        assert!(!msg.contains("TOKEN-123"));
    }

    #[test]
    fn test_missing_credential_message() {
        let err = ProviderError::MissingCredential(Source::ProviderB);
        assert_eq!(err.to_string(), "provider_b credential is not configured");
    }
}
