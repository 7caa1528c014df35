use async_trait::async_trait;
use tracing::debug;
use trust_dns_resolver::error::ResolveErrorKind;

use crate::dns::DnsClient;

use super::{Error, MxRecord, MxStatus};

/// Source of MX records. Implemented by [`DnsClient`]; tests plug stubs.
#[async_trait]
pub trait LookupMx: Send + Sync {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error>;
}

/// `resolveMX(domain)`: ordered exchanges, or an error when the lookup fails
/// or returns nothing.
pub async fn check_mx<R>(resolver: &R, domain: &str) -> Result<Vec<MxRecord>, Error>
where
    R: LookupMx + ?Sized,
{
    match resolve_with(resolver, domain).await? {
        MxStatus::Records(records) => Ok(records),
        MxStatus::NoRecords => Err(Error::NoRecords {
            domain: domain.to_string(),
        }),
    }
}

pub(crate) async fn resolve_with<R>(resolver: &R, domain: &str) -> Result<MxStatus, Error>
where
    R: LookupMx + ?Sized,
{
    let ascii = normalize_domain(domain)?;
    let mut records = resolver.lookup_mx(&ascii).await?;

    // tri stable: à préférence égale, l'ordre du résolveur est conservé
    records.sort_by_key(|record| record.preference);

    debug!(domain = %ascii, records = records.len(), "MX lookup complete");
    Ok(MxStatus::from(records))
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    Ok(trimmed.to_ascii_lowercase())
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

#[async_trait]
impl LookupMx for DnsClient {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error> {
        let lookup = tokio::time::timeout(self.budget(), self.resolver().mx_lookup(domain))
            .await
            .map_err(|_| Error::timeout(domain, self.budget()))?;
        let lookup = match lookup {
            Ok(lookup) => lookup,
            Err(err) => {
                if matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
                    return Ok(Vec::new());
                }
                return Err(Error::lookup(err));
            }
        };
        let records = lookup
            .iter()
            .map(|mx| MxRecord::new(mx.preference(), normalize_exchange(mx.exchange().to_utf8())))
            .collect();
        Ok(records)
    }
}
