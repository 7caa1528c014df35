//! SMTP banner probing.
//!
//! The public entry point is [`SmtpProber::probe`]. [`BannerProber`] opens a
//! plaintext session to the most preferred MX host, waits for the greeting and
//! quits; the result is a [`ProbeOutcome`], never an error. Mailbox-level
//! checks (`RCPT TO`) are deliberately not performed.

mod dns;
mod error;
mod options;
mod probe;
mod session;
mod types;

pub use error::SmtpVerifyError;
pub use options::SmtpProbeOptions;
pub use probe::{BannerProber, SmtpProber};
pub use types::{ProbeOutcome, ProbeStage, ProbeState, SmtpReply};
