use crate::mx::MxRecord;

/// Outcome of the MX lookup for the address domain.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxCheck {
    pub ok: bool,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub records: Vec<MxRecord>,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

impl MxCheck {
    pub fn found(records: Vec<MxRecord>) -> Self {
        Self {
            ok: true,
            records,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            records: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// SMTP probe status. `Skipped` means the network was never touched.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(tag = "status", rename_all = "lowercase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmtpCheck {
    Ok,
    Failed { reason: String },
    Skipped { reason: String },
}

impl SmtpCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ok => None,
            Self::Failed { reason } | Self::Skipped { reason } => Some(reason),
        }
    }
}

/// Per-address evidence. Every field except `syntax_valid` stays `None` until
/// its check has run; an address with invalid syntax carries nothing else.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    pub syntax_valid: bool,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub domain: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub is_role: Option<bool>,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub in_blocklist: Option<bool>,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub in_trusted_domains: Option<bool>,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub is_disposable: Option<bool>,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub mx: Option<MxCheck>,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub no_probe_list: Option<bool>,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub smtp: Option<SmtpCheck>,
    #[cfg_attr(
        feature = "with-serde",
        serde(rename = "hasSPF", default, skip_serializing_if = "Option::is_none")
    )]
    pub has_spf: Option<bool>,
    #[cfg_attr(
        feature = "with-serde",
        serde(rename = "hasDMARC", default, skip_serializing_if = "Option::is_none")
    )]
    pub has_dmarc: Option<bool>,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub domain_age_years: Option<u32>,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub requests_left: Option<u64>,
}

impl CheckResult {
    /// Result for an address that failed the syntax gate.
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn mx_ok(&self) -> bool {
        self.mx.as_ref().is_some_and(|mx| mx.ok)
    }

    pub fn smtp_ok(&self) -> bool {
        self.smtp.as_ref().is_some_and(SmtpCheck::is_ok)
    }

    /// Invalid syntax and a missing MX are the two definitive negatives.
    pub fn is_definitive_negative(&self) -> bool {
        !self.syntax_valid || !self.mx_ok()
    }
}

/// Accumulates a [`CheckResult`] for a syntactically valid address.
#[derive(Debug, Clone)]
pub struct CheckResultBuilder {
    inner: CheckResult,
}

impl CheckResultBuilder {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            inner: CheckResult {
                syntax_valid: true,
                domain: Some(domain.into()),
                ..CheckResult::default()
            },
        }
    }

    pub fn role(mut self, is_role: bool) -> Self {
        self.inner.is_role = Some(is_role);
        self
    }

    /// Sets blocklist membership; `is_disposable` mirrors it.
    pub fn blocklisted(mut self, listed: bool) -> Self {
        self.inner.in_blocklist = Some(listed);
        self.inner.is_disposable = Some(listed);
        self
    }

    pub fn trusted(mut self, trusted: bool) -> Self {
        self.inner.in_trusted_domains = Some(trusted);
        self
    }

    pub fn no_probe(mut self, listed: bool) -> Self {
        self.inner.no_probe_list = Some(listed);
        self
    }

    pub fn mx(mut self, mx: MxCheck) -> Self {
        self.inner.mx = Some(mx);
        self
    }

    pub fn smtp(mut self, smtp: SmtpCheck) -> Self {
        self.inner.smtp = Some(smtp);
        self
    }

    pub fn policies(mut self, has_spf: bool, has_dmarc: bool) -> Self {
        self.inner.has_spf = Some(has_spf);
        self.inner.has_dmarc = Some(has_dmarc);
        self
    }

    pub fn domain_age_years(mut self, years: u32) -> Self {
        self.inner.domain_age_years = Some(years);
        self
    }

    pub fn requests_left(mut self, requests_left: Option<u64>) -> Self {
        self.inner.requests_left = requests_left;
        self
    }

    pub fn build(self) -> CheckResult {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_result_carries_nothing() {
        let result = CheckResult::invalid();
        assert!(!result.syntax_valid);
        assert_eq!(result, CheckResult::default());
        assert!(result.is_definitive_negative());
    }

    #[test]
    fn builder_mirrors_disposable_on_blocklist() {
        let result = CheckResultBuilder::new("example.test")
            .blocklisted(true)
            .mx(MxCheck::found(vec![MxRecord::new(10, "mx.example.test")]))
            .build();
        assert_eq!(result.in_blocklist, Some(true));
        assert_eq!(result.is_disposable, Some(true));
        assert!(result.mx_ok());
        assert!(!result.is_definitive_negative());
    }

    #[test]
    fn smtp_reason() {
        assert_eq!(SmtpCheck::Ok.reason(), None);
        let skipped = SmtpCheck::Skipped {
            reason: "by request".into(),
        };
        assert!(skipped.is_skipped());
        assert_eq!(skipped.reason(), Some("by request"));
    }

    #[cfg(feature = "with-serde")]
    #[test]
    fn serializes_with_wire_names() {
        let result = CheckResultBuilder::new("example.test")
            .policies(true, false)
            .smtp(SmtpCheck::Skipped {
                reason: "by request".into(),
            })
            .build();
        let json = serde_json::to_value(&result).expect("json");
        assert_eq!(json["syntaxValid"], true);
        assert_eq!(json["hasSPF"], true);
        assert_eq!(json["hasDMARC"], false);
        assert_eq!(json["smtp"]["status"], "skipped");
        assert!(json.get("mx").is_none());

        let invalid = serde_json::to_value(CheckResult::invalid()).expect("json");
        assert_eq!(invalid, serde_json::json!({ "syntaxValid": false }));
    }
}
