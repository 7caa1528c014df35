//! Address syntax validation.
//!
//! [`parse_address`] is the only gate of the verification pipeline: an address
//! it rejects never reaches a network check.

mod domain;
mod local;
mod types;

pub use local::is_role_account;
pub use types::{Address, SyntaxError};

use std::sync::OnceLock;

use regex::Regex;

use domain::check_domain;
use local::check_local;

const ADDRESS_PATTERN: &str = r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$";

fn address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(ADDRESS_PATTERN).expect("address pattern compiles"))
}

/// Returns `true` when `address` passes [`parse_address`].
pub fn validate(address: &str) -> bool {
    parse_address(address).is_ok()
}

/// Splits and validates an address.
///
/// The domain is converted with IDNA and lower-cased; the local part keeps
/// its case.
pub fn parse_address(address: &str) -> Result<Address, SyntaxError> {
    let input = address.trim();
    if input.is_empty() {
        return Err(SyntaxError::Empty);
    }

    let mut reasons = Vec::new();

    if input.len() > 254 {
        reasons.push(format!("total length {} > 254", input.len()));
    }

    // doit contenir exactement un '@'
    let parts: Vec<&str> = input.split('@').collect();
    if parts.len() != 2 {
        reasons.push("must contain exactly one '@'".to_string());
        return Err(SyntaxError::invalid(reasons));
    }
    let (local, domain) = (parts[0], parts[1]);

    check_local(local, &mut reasons);
    let ascii_domain = check_domain(domain, &mut reasons);

    let Some(ascii_domain) = ascii_domain else {
        return Err(SyntaxError::invalid(reasons));
    };
    if !address_pattern().is_match(&format!("{local}@{ascii_domain}")) {
        reasons.push("address does not match the accepted pattern".to_string());
    }

    if reasons.is_empty() {
        Ok(Address::new(local, ascii_domain))
    } else {
        Err(SyntaxError::invalid(reasons))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_basic() {
        let addr = parse_address("alice@example.com").expect("valid");
        assert_eq!(addr.local(), "alice");
        assert_eq!(addr.domain(), "example.com");
    }

    #[test]
    fn lowercases_domain_only() {
        let addr = parse_address("User@EXAMPLE.com").expect("valid");
        assert_eq!(addr.local(), "User");
        assert_eq!(addr.domain(), "example.com");
        assert_eq!(addr.to_string(), "User@example.com");
    }

    #[test]
    fn rejects_empty_missing_and_double_at() {
        assert_eq!(parse_address(""), Err(SyntaxError::Empty));
        assert_eq!(parse_address("   "), Err(SyntaxError::Empty));
        assert!(!validate("not-an-email"));
        assert!(!validate("a@@b.com"));
        assert!(!validate("a@b@c.com"));
    }

    #[test]
    fn rejects_short_tld() {
        let err = parse_address("user@example.c").expect_err("tld too short");
        assert!(
            err.reasons().iter().any(|r| r.contains("top-level")),
            "{:?}",
            err.reasons()
        );
    }

    #[test]
    fn rejects_missing_local_part() {
        assert!(!validate("@example.com"));
    }

    #[test]
    fn accepts_subdomains_and_tags() {
        assert!(validate("first.last+news@mail.eu.example.org"));
    }
}
