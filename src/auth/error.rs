use std::time::Duration;

use thiserror::Error;

/// Errors raised when querying DNS policy records.
///
/// The policy checks fold every variant into "record absent"; the type exists
/// so collaborators can report what went wrong in logs.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("TXT lookup for {name} timed out after {}ms", after.as_millis())]
    Timeout { name: String, after: Duration },
    #[error("TXT lookup failed for {name}: {source}")]
    TxtLookup {
        name: String,
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
}

impl AuthError {
    pub(crate) fn timeout(name: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            name: name.into(),
            after,
        }
    }

    pub(crate) fn txt_lookup(
        name: impl Into<String>,
        source: trust_dns_resolver::error::ResolveError,
    ) -> Self {
        Self::TxtLookup {
            name: name.into(),
            source,
        }
    }
}
