/// atext ASCII + '.' non initial/terminal, pas de ".."
pub(crate) fn check_local(local: &str, reasons: &mut Vec<String>) {
    if local.is_empty() || local.len() > 64 {
        reasons.push(format!(
            "local part length {} invalid (1..=64)",
            local.len()
        ));
        return;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        reasons.push("local part has a leading, trailing or doubled '.'".to_string());
    }
    if !local.chars().all(is_local_char) {
        reasons.push(format!("local part '{local}' has invalid chars"));
    }
}

// Plus conservateur que l'atext RFC 5322: lettres, chiffres et ._%+-
fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

const ROLE_LOCAL_PARTS: &[&str] = &[
    "abuse",
    "admin",
    "administrator",
    "billing",
    "careers",
    "contact",
    "enquiries",
    "hello",
    "help",
    "hostmaster",
    "hr",
    "info",
    "jobs",
    "mail",
    "marketing",
    "newsletter",
    "no-reply",
    "noreply",
    "office",
    "postmaster",
    "root",
    "sales",
    "security",
    "support",
    "team",
    "webmaster",
];

/// Returns `true` when the local part names a function rather than a person.
///
/// A `+tag` sub-address suffix is ignored, so `support+eu` is a role account.
pub fn is_role_account(local: &str) -> bool {
    let base = local.split_once('+').map_or(local, |(head, _)| head);
    let lower = base.to_ascii_lowercase();
    ROLE_LOCAL_PARTS.binary_search(&lower.as_str()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reasons_for(local: &str) -> Vec<String> {
        let mut reasons = vec![];
        check_local(local, &mut reasons);
        reasons
    }

    #[test]
    fn strict_dots() {
        assert!(!reasons_for(".abc").is_empty());
        assert!(!reasons_for("abc.").is_empty());
        assert!(!reasons_for("a..b").is_empty());
        assert!(reasons_for("a.b").is_empty());
    }

    #[test]
    fn rejects_quoted_and_exotic_chars() {
        assert!(!reasons_for("\"a b\"").is_empty());
        assert!(!reasons_for("a{b}").is_empty());
        assert!(reasons_for("first.last+tag_1%x-y").is_empty());
    }

    #[test]
    fn role_table_is_sorted() {
        let mut sorted = ROLE_LOCAL_PARTS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, ROLE_LOCAL_PARTS);
    }

    #[test]
    fn role_detection_ignores_case_and_tag() {
        assert!(is_role_account("admin"));
        assert!(is_role_account("Support+eu"));
        assert!(!is_role_account("alice"));
        assert!(!is_role_account("administrators"));
    }
}
