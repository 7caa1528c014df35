use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MxError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("no MX records for {domain}")]
    NoRecords { domain: String },
    #[error("MX lookup for {domain} timed out after {}ms", after.as_millis())]
    Timeout { domain: String, after: Duration },
    #[error("MX lookup failed: {source}")]
    Lookup {
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
}

impl MxError {
    pub(crate) fn lookup(source: trust_dns_resolver::error::ResolveError) -> Self {
        Self::Lookup { source }
    }

    pub(crate) fn timeout(domain: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            domain: domain.into(),
            after,
        }
    }
}
