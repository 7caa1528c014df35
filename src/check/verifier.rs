use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::auth::{LookupTxt, check_policies};
use crate::dns::{DnsClient, DnsOptions};
use crate::lists::DomainLists;
use crate::mx::{LookupMx, check_mx};
use crate::score::{ScoreWeights, trust_score};
use crate::smtp_verify::{BannerProber, SmtpProbeOptions, SmtpProber};
use crate::validator::{is_role_account, parse_address};
use crate::whois::{WhoisClient, WhoisLookup, WhoisOptions, domain_age_years};

use super::options::CheckOptions;
use super::result::{CheckResult, CheckResultBuilder, MxCheck, SmtpCheck};

/// Reason reported for domains on the no-probe list.
pub const NO_PROBE_REASON: &str = "Provider blocks SMTP probes";
pub(crate) const NO_MX_REASON: &str = "no MX records";
pub(crate) const SKIPPED_BY_REQUEST_REASON: &str = "skipped by request";

/// Source of "now" for the domain-age computation.
pub type Clock = fn() -> DateTime<Utc>;

/// Score and evidence for one address.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub result: CheckResult,
    pub score: u8,
}

/// Runs the verification pipeline for one address or a batch.
///
/// Built once with its domain lists and collaborators, then shared.
#[derive(Clone)]
pub struct Verifier {
    mx: Arc<dyn LookupMx>,
    txt: Arc<dyn LookupTxt>,
    smtp: Arc<dyn SmtpProber>,
    whois: Arc<dyn WhoisLookup>,
    lists: DomainLists,
    options: CheckOptions,
    weights: ScoreWeights,
    clock: Clock,
}

impl Verifier {
    /// Verifier with the network collaborators and default options.
    pub fn new(lists: DomainLists) -> Self {
        Self::builder(lists).build()
    }

    pub fn builder(lists: DomainLists) -> VerifierBuilder {
        VerifierBuilder::new(lists)
    }

    pub fn lists(&self) -> &DomainLists {
        &self.lists
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// `check_email(address, skip_smtp, requests_left)`.
    ///
    /// Nothing runs past the syntax gate for an invalid address. Otherwise
    /// the MX → SMTP chain, the SPF/DMARC lookups and the WHOIS lookup run
    /// concurrently. Collaborator failures end up in the result fields.
    #[instrument(level = "debug", skip(self))]
    pub async fn check_email(
        &self,
        address: &str,
        skip_smtp: bool,
        requests_left: Option<u64>,
    ) -> CheckResult {
        let parsed = match parse_address(address) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(error = %err, "syntax check failed");
                return CheckResult::invalid();
            }
        };
        let domain = parsed.domain();

        let no_probe = self.lists.no_probe().contains(domain);
        let builder = CheckResultBuilder::new(domain)
            .role(is_role_account(parsed.local()))
            .blocklisted(self.lists.blocklist().contains(domain))
            .trusted(self.lists.trusted().contains(domain))
            .no_probe(no_probe)
            .requests_left(requests_left);

        let now = (self.clock)();
        let ((mx, smtp), policies, age) = tokio::join!(
            self.delivery(domain, skip_smtp, no_probe),
            self.guarded("policies", check_policies(self.txt.as_ref(), domain)),
            self.guarded("whois", domain_age_years(self.whois.as_ref(), domain, now)),
        );
        let policies = policies.unwrap_or_default();

        let result = builder
            .mx(mx)
            .smtp(smtp)
            .policies(policies.has_spf, policies.has_dmarc)
            .domain_age_years(age.unwrap_or(0))
            .build();
        info!(
            domain,
            mx_ok = result.mx_ok(),
            smtp_ok = result.smtp_ok(),
            "address checked"
        );
        result
    }

    /// Verifies every address, at most `concurrency` at a time. Results come
    /// back in input order.
    pub async fn check_batch<I, S>(
        &self,
        addresses: I,
        skip_smtp: bool,
        requests_left: Option<u64>,
    ) -> Vec<CheckResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        stream::iter(addresses)
            .map(|address| async move {
                self.check_email(address.as_ref(), skip_smtp, requests_left)
                    .await
            })
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await
    }

    /// [`check_email`](Self::check_email) followed by [`score`](Self::score).
    pub async fn verify(
        &self,
        address: &str,
        skip_smtp: bool,
        requests_left: Option<u64>,
    ) -> Verification {
        let result = self.check_email(address, skip_smtp, requests_left).await;
        let score = self.score(&result);
        Verification { result, score }
    }

    pub fn score(&self, result: &CheckResult) -> u8 {
        trust_score(result, &self.weights)
    }

    async fn delivery(
        &self,
        domain: &str,
        skip_smtp: bool,
        no_probe: bool,
    ) -> (MxCheck, SmtpCheck) {
        let mx = match self.guarded("mx", check_mx(self.mx.as_ref(), domain)).await {
            Some(Ok(records)) => MxCheck::found(records),
            Some(Err(err)) => MxCheck::failed(err.to_string()),
            None => MxCheck::failed(self.step_timed_out("MX lookup")),
        };

        let skip_reason = if no_probe {
            Some(NO_PROBE_REASON)
        } else if !mx.ok {
            Some(NO_MX_REASON)
        } else if skip_smtp {
            Some(SKIPPED_BY_REQUEST_REASON)
        } else {
            None
        };
        if let Some(reason) = skip_reason {
            debug!(domain, reason, "SMTP probe skipped");
            let smtp = SmtpCheck::Skipped {
                reason: reason.to_string(),
            };
            return (mx, smtp);
        }

        let smtp = match self
            .guarded("smtp", self.smtp.probe(domain, &mx.records))
            .await
        {
            Some(outcome) if outcome.is_reachable() => SmtpCheck::Ok,
            Some(outcome) => SmtpCheck::Failed {
                reason: outcome
                    .diagnostic()
                    .unwrap_or_else(|| "server did not greet".to_string()),
            },
            None => SmtpCheck::Failed {
                reason: self.step_timed_out("SMTP probe"),
            },
        };
        (mx, smtp)
    }

    async fn guarded<T, F>(&self, step: &'static str, future: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        match tokio::time::timeout(self.options.step_timeout, future).await {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(
                    step,
                    after_ms = self.options.step_timeout.as_millis() as u64,
                    "verification step timed out"
                );
                None
            }
        }
    }

    fn step_timed_out(&self, step: &str) -> String {
        format!(
            "{step} timed out after {}ms",
            self.options.step_timeout.as_millis()
        )
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("lists", &self.lists)
            .field("options", &self.options)
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}

/// Assembles a [`Verifier`]. Collaborators left unset are built from the
/// matching options: [`DnsClient`] for MX and TXT, [`BannerProber`] for SMTP
/// and [`WhoisClient`] for WHOIS.
pub struct VerifierBuilder {
    lists: DomainLists,
    mx: Option<Arc<dyn LookupMx>>,
    txt: Option<Arc<dyn LookupTxt>>,
    smtp: Option<Arc<dyn SmtpProber>>,
    whois: Option<Arc<dyn WhoisLookup>>,
    dns_options: DnsOptions,
    smtp_options: SmtpProbeOptions,
    whois_options: WhoisOptions,
    options: CheckOptions,
    weights: ScoreWeights,
    clock: Clock,
}

impl VerifierBuilder {
    pub fn new(lists: DomainLists) -> Self {
        Self {
            lists,
            mx: None,
            txt: None,
            smtp: None,
            whois: None,
            dns_options: DnsOptions::default(),
            smtp_options: SmtpProbeOptions::default(),
            whois_options: WhoisOptions::default(),
            options: CheckOptions::default(),
            weights: ScoreWeights::default(),
            clock: Utc::now,
        }
    }

    pub fn mx_resolver(mut self, resolver: Arc<dyn LookupMx>) -> Self {
        self.mx = Some(resolver);
        self
    }

    pub fn txt_resolver(mut self, resolver: Arc<dyn LookupTxt>) -> Self {
        self.txt = Some(resolver);
        self
    }

    pub fn smtp_prober(mut self, prober: Arc<dyn SmtpProber>) -> Self {
        self.smtp = Some(prober);
        self
    }

    pub fn whois(mut self, whois: Arc<dyn WhoisLookup>) -> Self {
        self.whois = Some(whois);
        self
    }

    pub fn dns_options(mut self, options: DnsOptions) -> Self {
        self.dns_options = options;
        self
    }

    pub fn smtp_options(mut self, options: SmtpProbeOptions) -> Self {
        self.smtp_options = options;
        self
    }

    pub fn whois_options(mut self, options: WhoisOptions) -> Self {
        self.whois_options = options;
        self
    }

    pub fn options(mut self, options: CheckOptions) -> Self {
        self.options = options;
        self
    }

    pub fn weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> Verifier {
        // un seul client DNS, partagé entre MX et TXT
        let dns_options = &self.dns_options;
        let mut dns: Option<Arc<DnsClient>> = None;
        let mut shared_dns =
            || dns.get_or_insert_with(|| Arc::new(DnsClient::new(dns_options))).clone();
        let mx: Arc<dyn LookupMx> = match self.mx {
            Some(mx) => mx,
            None => shared_dns(),
        };
        let txt: Arc<dyn LookupTxt> = match self.txt {
            Some(txt) => txt,
            None => shared_dns(),
        };
        let smtp: Arc<dyn SmtpProber> = match self.smtp {
            Some(smtp) => smtp,
            None => Arc::new(BannerProber::new(self.smtp_options)),
        };
        let whois: Arc<dyn WhoisLookup> = match self.whois {
            Some(whois) => whois,
            None => Arc::new(WhoisClient::new(self.whois_options)),
        };
        Verifier {
            mx,
            txt,
            smtp,
            whois,
            lists: self.lists,
            options: self.options,
            weights: self.weights,
            clock: self.clock,
        }
    }
}
