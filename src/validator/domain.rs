/// Valide le domaine: conversion IDNA + checks de labels.
/// Renvoie la forme ASCII minuscule, ou pousse les raisons invalidantes.
pub(crate) fn check_domain(domain: &str, reasons: &mut Vec<String>) -> Option<String> {
    if domain.is_empty() {
        reasons.push("domain is empty".to_string());
        return None;
    }

    let domain_ascii = match idna::domain_to_ascii(domain) {
        Ok(d) => d.to_ascii_lowercase(),
        Err(_) => {
            reasons.push("domain punycode conversion failed".to_string());
            return None;
        }
    };

    if domain_ascii.is_empty() {
        reasons.push("domain empty after IDNA conversion".to_string());
        return None;
    }

    let before = reasons.len();

    // au moins un point
    if !domain_ascii.contains('.') {
        reasons.push("domain must contain at least one dot".to_string());
    }

    for label in domain_ascii.split('.') {
        if label.is_empty() {
            reasons.push("empty domain label".to_string());
            continue;
        }
        if label.len() > 63 {
            reasons.push(format!(
                "domain label '{}' length {} > 63",
                label,
                label.len()
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            reasons.push(format!(
                "domain label '{}' cannot start/end with '-'",
                label
            ));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            reasons.push(format!("domain label '{}' has invalid chars", label));
        }
    }

    if let Some(tld) = domain_ascii.rsplit('.').next() {
        if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
            reasons.push(format!(
                "top-level label '{tld}' must be at least 2 letters"
            ));
        }
    }

    (reasons.len() == before).then_some(domain_ascii)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_domain_ok() {
        let mut reasons = vec![];
        let ascii = check_domain("Example.COM", &mut reasons);
        assert!(reasons.is_empty(), "{:?}", reasons);
        assert_eq!(ascii.as_deref(), Some("example.com"));
    }

    #[test]
    fn label_too_long() {
        let long = "a".repeat(64);
        let mut reasons = vec![];
        assert!(check_domain(&format!("{}.com", long), &mut reasons).is_none());
        assert!(!reasons.is_empty());
    }

    #[test]
    fn short_or_numeric_tld_rejected() {
        for domain in ["example.c", "example.123", "localhost"] {
            let mut reasons = vec![];
            assert!(check_domain(domain, &mut reasons).is_none(), "{domain}");
        }
    }

    #[test]
    fn idn_converted_to_punycode() {
        let mut reasons = vec![];
        let ascii = check_domain("exämple.com", &mut reasons).expect("valid idn");
        assert!(ascii.starts_with("xn--"), "{ascii}");
    }
}
