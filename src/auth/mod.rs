//! SPF and DMARC presence checks.
//!
//! Both checks are positive signals only: a lookup error, an NXDOMAIN or a
//! timeout all read as "no record".

mod dmarc;
mod error;
mod resolver;
mod spf;
mod types;

pub use error::AuthError;
pub use resolver::LookupTxt;
pub use types::PolicyStatus;

use resolver::{fqdn, normalize_domain};
use tracing::debug;

/// `hasSPF(domain)`.
pub async fn has_spf<R>(resolver: &R, domain: &str) -> bool
where
    R: LookupTxt + ?Sized,
{
    match lookup(resolver, domain, None).await {
        Ok(records) => spf::is_present(&records),
        Err(err) => {
            debug!(domain, error = %err, "SPF lookup failed");
            false
        }
    }
}

/// `hasDMARC(domain)`, queried at `_dmarc.<domain>`.
pub async fn has_dmarc<R>(resolver: &R, domain: &str) -> bool
where
    R: LookupTxt + ?Sized,
{
    match lookup(resolver, domain, Some(dmarc::DMARC_LABEL)).await {
        Ok(records) => dmarc::is_present(&records),
        Err(err) => {
            debug!(domain, error = %err, "DMARC lookup failed");
            false
        }
    }
}

/// Runs both lookups concurrently.
pub async fn check_policies<R>(resolver: &R, domain: &str) -> PolicyStatus
where
    R: LookupTxt + ?Sized,
{
    let (has_spf, has_dmarc) = tokio::join!(
        has_spf(resolver, domain),
        has_dmarc(resolver, domain)
    );
    PolicyStatus { has_spf, has_dmarc }
}

async fn lookup<R>(
    resolver: &R,
    domain: &str,
    label: Option<&str>,
) -> Result<Vec<String>, AuthError>
where
    R: LookupTxt + ?Sized,
{
    let ascii = normalize_domain(domain)?;
    let name = match label {
        Some(label) => fqdn(label, &ascii),
        None => ascii,
    };
    resolver.lookup_txt(&name).await
}

#[cfg(test)]
mod tests;
