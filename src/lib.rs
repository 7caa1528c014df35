#![forbid(unsafe_code)]
//! mailtrust: vérification d'adresses e-mail et score de confiance
//!
//! [`Verifier`] runs the pipeline (syntax, domain lists, MX, SMTP banner,
//! SPF/DMARC, WHOIS age) and [`trust_score`] reduces its [`CheckResult`] to a
//! percentage.

pub mod auth;
pub mod check;
pub mod dns;
pub mod lists;
pub mod mx;
pub mod score;
pub mod smtp_verify;
pub mod validator;
pub mod whois;

pub use auth::{AuthError, LookupTxt, PolicyStatus, check_policies, has_dmarc, has_spf};
pub use check::{
    CheckOptions, CheckResult, CheckResultBuilder, MxCheck, NO_PROBE_REASON, SmtpCheck,
    Verification, Verifier, VerifierBuilder,
};
pub use dns::{DnsClient, DnsOptions};
pub use lists::{DomainList, DomainLists, ListError, in_list, load_domain_list};
pub use mx::{Error as MxError, LookupMx, MxRecord, MxStatus, check_mx};
pub use score::{ScoreWeights, trust_score};
pub use smtp_verify::{BannerProber, ProbeOutcome, SmtpProbeOptions, SmtpProber};
pub use validator::{Address, SyntaxError, is_role_account, parse_address, validate};
pub use whois::{WhoisClient, WhoisError, WhoisLookup, WhoisOptions, domain_age_years};
