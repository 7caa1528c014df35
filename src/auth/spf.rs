use super::types::starts_with_ignore_ascii_case;

pub(crate) const SPF_VERSION_TAG: &str = "v=spf1";

/// True when any record declares an SPF policy.
pub(crate) fn is_present(records: &[String]) -> bool {
    records
        .iter()
        .any(|record| starts_with_ignore_ascii_case(record.trim_start(), SPF_VERSION_TAG))
}
