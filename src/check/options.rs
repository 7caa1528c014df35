use std::time::Duration;

use crate::smtp_verify::SmtpProbeOptions;

/// Orchestration knobs for [`Verifier`](super::Verifier).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Guard around each pipeline step (MX, SMTP, policies, WHOIS), on top of
    /// the collaborators' own timeouts. Defaults to the session budget of the
    /// default SMTP probe.
    pub step_timeout: Duration,
    /// Addresses verified at once by [`Verifier::check_batch`](super::Verifier::check_batch).
    pub concurrency: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            step_timeout: SmtpProbeOptions::default().session_budget(),
            concurrency: 8,
        }
    }
}

impl CheckOptions {
    pub fn with_step_timeout(mut self, step_timeout: Duration) -> Self {
        self.step_timeout = step_timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_guard_covers_a_whole_probe() {
        let options = CheckOptions::default();
        assert_eq!(options.step_timeout, Duration::from_secs(30));
        assert_eq!(
            options.step_timeout,
            SmtpProbeOptions::default().session_budget()
        );
        assert_eq!(options.concurrency, 8);
    }

    #[test]
    fn concurrency_is_at_least_one() {
        assert_eq!(CheckOptions::default().with_concurrency(0).concurrency, 1);
    }
}
