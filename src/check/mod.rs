//! Verification orchestrator.
//!
//! [`Verifier::check_email`] sequences the syntax gate, list matching, the
//! MX → SMTP chain, SPF/DMARC and domain age for one address and folds every
//! outcome into a [`CheckResult`].

mod options;
mod result;
mod verifier;

pub use options::CheckOptions;
pub use result::{CheckResult, CheckResultBuilder, MxCheck, SmtpCheck};
pub use verifier::{Clock, NO_PROBE_REASON, Verification, Verifier, VerifierBuilder};
