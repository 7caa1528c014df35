//! Trust score: a pure reduction of a [`CheckResult`] to a 0–100 percentage.

mod weights;

pub use weights::ScoreWeights;

use crate::check::{CheckResult, SmtpCheck};

/// Upper bound of the score.
pub const MAX_SCORE: u8 = 100;

/// Combines the evidence in `result` with `weights`, clamped to `[0, 100]`.
///
/// An address with invalid syntax always scores 0. Missing fields (a check
/// that did not run) contribute nothing.
pub fn trust_score(result: &CheckResult, weights: &ScoreWeights) -> u8 {
    if !result.syntax_valid {
        return 0;
    }

    let flag = |value: Option<bool>| value.unwrap_or(false);
    let mut total = i64::from(weights.syntax_base);

    total += i64::from(match &result.mx {
        Some(mx) if mx.ok => weights.mx_present,
        Some(_) => weights.mx_absent,
        None => 0,
    });
    total += i64::from(match &result.smtp {
        Some(SmtpCheck::Ok) => weights.smtp_ok,
        Some(SmtpCheck::Failed { .. }) => weights.smtp_failed,
        Some(SmtpCheck::Skipped { .. }) => weights.smtp_skipped,
        None => 0,
    });
    if flag(result.in_blocklist) {
        total += i64::from(weights.blocklist);
    }
    if flag(result.is_disposable) {
        total += i64::from(weights.disposable);
    }
    // bonus unique, même si le domaine est dans les deux listes
    if flag(result.in_trusted_domains) || flag(result.no_probe_list) {
        total += i64::from(weights.trusted);
    }
    if flag(result.is_role) {
        total += i64::from(weights.role);
    }
    if flag(result.has_spf) {
        total += i64::from(weights.spf);
    }
    if flag(result.has_dmarc) {
        total += i64::from(weights.dmarc);
    }
    total += i64::from(weights.age_bonus(result.domain_age_years.unwrap_or(0)));

    total.clamp(0, i64::from(MAX_SCORE)) as u8
}
