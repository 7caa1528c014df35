use std::fmt;

use thiserror::Error;

/// A syntactically valid address, split into its two halves.
///
/// The domain is stored in its lower-cased ASCII (punycode) form so it can be
/// handed straight to DNS and list lookups.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    local: String,
    domain: String,
}

impl Address {
    pub(crate) fn new(local: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            domain: domain.into(),
        }
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local, self.domain)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("address is empty")]
    Empty,
    #[error("invalid address: {}", reasons.join("; "))]
    Invalid { reasons: Vec<String> },
}

impl SyntaxError {
    pub(crate) fn invalid(reasons: Vec<String>) -> Self {
        Self::Invalid { reasons }
    }

    pub fn reasons(&self) -> Vec<String> {
        match self {
            Self::Empty => vec!["address is empty".to_string()],
            Self::Invalid { reasons } => reasons.clone(),
        }
    }
}
