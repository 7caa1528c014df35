/// Weighted terms of the trust score. Penalties are negative.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub syntax_base: i32,
    pub mx_present: i32,
    pub mx_absent: i32,
    pub smtp_ok: i32,
    pub smtp_failed: i32,
    pub smtp_skipped: i32,
    pub blocklist: i32,
    /// Extra penalty for disposable domains. Disposable is derived from the
    /// blocklist, so this stays at 0 unless a caller wants it counted twice.
    pub disposable: i32,
    /// Applied once for a trusted or no-probe domain.
    pub trusted: i32,
    pub role: i32,
    pub spf: i32,
    pub dmarc: i32,
    pub age_per_year: i32,
    pub age_cap: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            syntax_base: 20,
            mx_present: 20,
            mx_absent: 0,
            smtp_ok: 30,
            smtp_failed: -5,
            smtp_skipped: 0,
            blocklist: -50,
            disposable: 0,
            trusted: 10,
            role: -10,
            spf: 5,
            dmarc: 5,
            age_per_year: 2,
            age_cap: 5,
        }
    }
}

impl ScoreWeights {
    /// `age_per_year * years`, capped at `age_cap`.
    pub fn age_bonus(&self, years: u32) -> i32 {
        let years = i32::try_from(years).unwrap_or(i32::MAX);
        self.age_per_year.saturating_mul(years).min(self.age_cap)
    }
}
