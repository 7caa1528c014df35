//! Read-only domain sets (blocklist, trusted domains, no-probe providers).

mod error;
mod loader;

pub use error::ListError;
pub use loader::load_domain_list;

use std::collections::HashSet;
use std::sync::Arc;

/// Providers that detect or throttle banner-only SMTP probes.
const DEFAULT_NO_PROBE: &[&str] = &[
    "aol.com",
    "gmail.com",
    "gmx.com",
    "googlemail.com",
    "hotmail.com",
    "icloud.com",
    "live.com",
    "mail.ru",
    "me.com",
    "msn.com",
    "outlook.com",
    "proton.me",
    "protonmail.com",
    "yahoo.com",
    "yandex.ru",
];

/// Immutable set of lower-cased domains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainList {
    domains: HashSet<String>,
}

impl DomainList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test. Empty or blank input never matches.
    pub fn contains(&self, domain: &str) -> bool {
        let trimmed = domain.trim().trim_end_matches('.');
        if trimmed.is_empty() {
            return false;
        }
        self.domains.contains(&trimmed.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Built-in list of large webmail operators.
    pub fn default_no_probe() -> Self {
        DEFAULT_NO_PROBE.iter().copied().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for DomainList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let domains = iter
            .into_iter()
            .map(|d| d.as_ref().trim().trim_end_matches('.').to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self { domains }
    }
}

/// `inList(domain, list)`.
pub fn in_list(domain: &str, list: &DomainList) -> bool {
    list.contains(domain)
}

/// The three lists the pipeline consults, built once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct DomainLists {
    blocklist: Arc<DomainList>,
    trusted: Arc<DomainList>,
    no_probe: Arc<DomainList>,
}

impl DomainLists {
    pub fn new(blocklist: DomainList, trusted: DomainList, no_probe: DomainList) -> Self {
        Self {
            blocklist: Arc::new(blocklist),
            trusted: Arc::new(trusted),
            no_probe: Arc::new(no_probe),
        }
    }

    pub fn blocklist(&self) -> &DomainList {
        &self.blocklist
    }

    pub fn trusted(&self) -> &DomainList {
        &self.trusted
    }

    pub fn no_probe(&self) -> &DomainList {
        &self.no_probe
    }
}
