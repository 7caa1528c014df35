use std::time::Duration;

use thiserror::Error;

use super::types::ProbeStage;

#[derive(Debug, Error)]
pub enum SmtpVerifyError {
    #[error("no MX host to probe")]
    NoMxHosts,
    #[error("cannot resolve {host}: {source}")]
    HostResolution {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{host} has no usable address")]
    NoAddresses { host: String },
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} timed out after {}ms", after.as_millis())]
    Timeout { stage: ProbeStage, after: Duration },
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl SmtpVerifyError {
    pub(crate) fn timeout(stage: ProbeStage, after: Duration) -> Self {
        Self::Timeout { stage, after }
    }

    pub(crate) fn io(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}
