use super::types::starts_with_ignore_ascii_case;

pub(crate) const DMARC_LABEL: &str = "_dmarc";
pub(crate) const DMARC_VERSION_TAG: &str = "v=dmarc1";

/// True when any record at `_dmarc.<domain>` declares a DMARC policy.
pub(crate) fn is_present(records: &[String]) -> bool {
    records
        .iter()
        .any(|record| starts_with_ignore_ascii_case(record.trim_start(), DMARC_VERSION_TAG))
}
