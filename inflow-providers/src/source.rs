//! Data sources the dashboard can pull from.

use serde::{Deserialize, Serialize};

/// A provider the API knows how to fetch from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Payments API (card/wallet movements)
    ProviderA,
    /// Bank-account API
    ProviderB,
}

impl Source {
    /// Wire name, used in URLs and as the `origin` stamped on transactions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::ProviderA => "provider_a",
            Source::ProviderB => "provider_b",
        }
    }

    pub fn parse(s: &str) -> Option<Source> {
        match s {
            "provider_a" => Some(Source::ProviderA),
            "provider_b" => Some(Source::ProviderB),
            _ => None,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for s in [Source::ProviderA, Source::ProviderB] {
            assert_eq!(Source::parse(s.as_str()), Some(s));
        }
        assert_eq!(Source::parse("provider_c"), None);
    }

    #[test]
    fn test_serde_snake_case() {
        let v = serde_json::to_value(Source::ProviderA).unwrap();
        assert_eq!(v, "provider_a");
    }
}
