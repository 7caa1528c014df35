use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WhoisError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("connection to WHOIS server {server} failed: {source}")]
    Connect {
        server: String,
        #[source]
        source: std::io::Error,
    },
    #[error("WHOIS query to {server} timed out after {}ms", after.as_millis())]
    Timeout { server: String, after: Duration },
    #[error("I/O error talking to {server}: {source}")]
    Io {
        server: String,
        #[source]
        source: std::io::Error,
    },
}

impl WhoisError {
    pub(crate) fn connect(server: impl Into<String>, source: std::io::Error) -> Self {
        Self::Connect {
            server: server.into(),
            source,
        }
    }

    pub(crate) fn timeout(server: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            server: server.into(),
            after,
        }
    }

    pub(crate) fn io(server: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            server: server.into(),
            source,
        }
    }
}
