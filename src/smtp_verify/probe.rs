use async_trait::async_trait;
use tracing::{debug, info};

use crate::mx::MxRecord;
use crate::smtp_verify::dns::{resolve_addrs, select_host};
use crate::smtp_verify::error::SmtpVerifyError;
use crate::smtp_verify::options::SmtpProbeOptions;
use crate::smtp_verify::session::SmtpSession;
use crate::smtp_verify::types::{ProbeOutcome, ProbeState};

/// SMTP reachability collaborator.
///
/// `records` is the MX set already resolved for `domain`; implementations
/// pick the most preferred host themselves.
#[async_trait]
pub trait SmtpProber: Send + Sync {
    async fn probe(&self, domain: &str, records: &[MxRecord]) -> ProbeOutcome;
}

/// Connects to the preferred exchange on port 25, waits for the banner and
/// leaves with `QUIT`. No envelope command is ever sent.
#[derive(Debug, Clone, Default)]
pub struct BannerProber {
    options: SmtpProbeOptions,
}

impl BannerProber {
    pub fn new(options: SmtpProbeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SmtpProbeOptions {
        &self.options
    }
}

#[async_trait]
impl SmtpProber for BannerProber {
    async fn probe(&self, domain: &str, records: &[MxRecord]) -> ProbeOutcome {
        let outcome = run_probe(&self.options, records).await;
        transition(domain, outcome.terminal_state(), ProbeState::Closed);
        info!(
            domain,
            reachable = outcome.is_reachable(),
            diagnostic = outcome.diagnostic().as_deref().unwrap_or(""),
            "SMTP probe finished"
        );
        outcome
    }
}

pub(crate) async fn run_probe(options: &SmtpProbeOptions, records: &[MxRecord]) -> ProbeOutcome {
    let Some(candidate) = select_host(records) else {
        return ProbeOutcome::ResolutionError {
            reason: SmtpVerifyError::NoMxHosts.to_string(),
        };
    };
    let host = candidate.exchange.as_str();

    let addrs = match resolve_addrs(host, options.port, options.ipv6, options.connect_timeout).await
    {
        Ok(addrs) => addrs,
        Err(err) => {
            return ProbeOutcome::ResolutionError {
                reason: err.to_string(),
            };
        }
    };
    transition(host, ProbeState::Resolving, ProbeState::Connecting);

    let mut session =
        match SmtpSession::connect(host, &addrs, options.connect_timeout, options.idle_timeout)
            .await
        {
            Ok(session) => session,
            Err(err) => return failure(host, err),
        };

    let banner = match session.read_greeting(options.greeting_timeout).await {
        Ok(reply) => reply,
        // la session est abandonnée: le drop ferme le socket
        Err(err) => return failure(host, err),
    };

    let outcome = if banner.is_positive_completion() {
        transition(host, ProbeState::Connecting, ProbeState::Greeted);
        ProbeOutcome::Greeted {
            host: host.to_string(),
            banner: format!("{} {}", banner.code, banner.text()),
        }
    } else {
        transition(host, ProbeState::Connecting, ProbeState::ConnectFailed);
        ProbeOutcome::Blocked {
            host: host.to_string(),
            reason: format!("greeting rejected with {}", banner.code),
        }
    };

    let transcript = session.quit().await;
    debug!(host, transcript = ?transcript, "SMTP session closed");
    outcome
}

fn failure(host: &str, err: SmtpVerifyError) -> ProbeOutcome {
    match err {
        SmtpVerifyError::Timeout { stage, after } => {
            transition(host, ProbeState::Connecting, ProbeState::TimedOut);
            ProbeOutcome::TimedOut {
                host: host.to_string(),
                stage,
                after,
            }
        }
        other => {
            transition(host, ProbeState::Connecting, ProbeState::ConnectFailed);
            ProbeOutcome::Blocked {
                host: host.to_string(),
                reason: other.to_string(),
            }
        }
    }
}

fn transition(target: &str, from: ProbeState, to: ProbeState) {
    debug!(target_host = target, ?from, ?to, "SMTP probe state");
}
