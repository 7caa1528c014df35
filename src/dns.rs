//! Shared async DNS resolver construction.

use std::time::Duration;

use trust_dns_resolver::{
    TokioAsyncResolver,
    config::{ResolverConfig, ResolverOpts},
};

/// Resolver knobs. Each query is bounded by `timeout` per attempt.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsOptions {
    pub timeout: Duration,
    pub attempts: usize,
    pub cache_size: usize,
}

impl Default for DnsOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            attempts: 2,
            cache_size: 1_024,
        }
    }
}

impl DnsOptions {
    /// Worst-case wall-clock time a single query may take.
    pub fn query_budget(&self) -> Duration {
        self.timeout * self.attempts.max(1) as u32
    }
}

pub fn build_resolver(options: &DnsOptions) -> TokioAsyncResolver {
    let mut opts = ResolverOpts::default();
    opts.timeout = options.timeout;
    opts.attempts = options.attempts;
    opts.cache_size = options.cache_size;
    TokioAsyncResolver::tokio(ResolverConfig::default(), opts)
}

/// MX and TXT collaborator backed by the tokio resolver.
///
/// Every query is additionally wrapped in [`DnsOptions::query_budget`] so a
/// stuck upstream cannot outlive its attempts.
#[derive(Clone)]
pub struct DnsClient {
    resolver: TokioAsyncResolver,
    budget: Duration,
}

impl DnsClient {
    pub fn new(options: &DnsOptions) -> Self {
        Self {
            resolver: build_resolver(options),
            budget: options.query_budget(),
        }
    }

    pub(crate) fn resolver(&self) -> &TokioAsyncResolver {
        &self.resolver
    }

    pub(crate) fn budget(&self) -> Duration {
        self.budget
    }
}

impl std::fmt::Debug for DnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsClient")
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}
