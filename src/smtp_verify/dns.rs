use std::net::SocketAddr;
use std::time::Duration;

use crate::mx::MxRecord;
use crate::smtp_verify::error::SmtpVerifyError;
use crate::smtp_verify::types::ProbeStage;

/// Most preferred exchange: numerically lowest preference, first on ties.
pub(crate) fn select_host(records: &[MxRecord]) -> Option<&MxRecord> {
    records
        .iter()
        .enumerate()
        .min_by_key(|(idx, record)| (record.preference, *idx))
        .map(|(_, record)| record)
}

pub(crate) async fn resolve_addrs(
    host: &str,
    port: u16,
    allow_ipv6: bool,
    timeout: Duration,
) -> Result<Vec<SocketAddr>, SmtpVerifyError> {
    let lookup = tokio::time::timeout(timeout, tokio::net::lookup_host((host, port)))
        .await
        .map_err(|_| SmtpVerifyError::timeout(ProbeStage::Resolve, timeout))?;
    let iter = lookup.map_err(|err| SmtpVerifyError::HostResolution {
        host: host.to_string(),
        source: err,
    })?;

    let addrs: Vec<SocketAddr> = iter.filter(|addr| allow_ipv6 || addr.is_ipv4()).collect();
    if addrs.is_empty() {
        return Err(SmtpVerifyError::NoAddresses {
            host: host.to_string(),
        });
    }
    Ok(addrs)
}
