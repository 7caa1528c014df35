use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::{AuthError, LookupTxt, PolicyStatus, check_policies, dmarc, has_dmarc, has_spf, spf};

#[derive(Default)]
struct StubResolver {
    records: HashMap<String, Vec<String>>,
    failing: Vec<String>,
}

impl StubResolver {
    fn new() -> Self {
        Self::default()
    }

    fn insert_records<I, S>(&mut self, name: &str, records: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = normalize_name(name);
        let values = records.into_iter().map(Into::into).collect();
        self.records.insert(key, values);
    }

    fn fail_on(&mut self, name: &str) {
        self.failing.push(normalize_name(name));
    }
}

#[async_trait]
impl LookupTxt for StubResolver {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, AuthError> {
        let key = normalize_name(name);
        if self.failing.contains(&key) {
            return Err(AuthError::timeout(name, Duration::from_millis(10)));
        }
        Ok(self.records.get(&key).cloned().unwrap_or_default())
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

#[test]
fn spf_reports_missing_when_no_records() {
    assert!(!spf::is_present(&[]));
}

#[test]
fn spf_tag_matches_case_insensitively() {
    let input = vec![
        "google-site-verification=abc".to_string(),
        "V=SPF1 include:_spf.example.net ~all".to_string(),
    ];
    assert!(spf::is_present(&input));
}

#[test]
fn spf_tag_must_prefix_the_record() {
    let input = vec!["note: v=spf1 lives elsewhere".to_string()];
    assert!(!spf::is_present(&input));
}

#[test]
fn dmarc_detected_regardless_of_policy() {
    let input = vec!["v=DMARC1; p=none; rua=mailto:d@example.com".to_string()];
    assert!(dmarc::is_present(&input));
}

#[tokio::test]
async fn dmarc_queried_at_underscore_label() {
    let mut stub = StubResolver::new();
    stub.insert_records("example.com", vec!["v=DMARC1; p=reject"]);
    assert!(!has_dmarc(&stub, "example.com").await);

    stub.insert_records("_dmarc.example.com", vec!["v=DMARC1; p=reject"]);
    assert!(has_dmarc(&stub, "Example.com").await);
}

#[tokio::test]
async fn lookup_errors_read_as_absent() {
    let mut stub = StubResolver::new();
    stub.insert_records("example.com", vec!["v=spf1 -all"]);
    stub.fail_on("example.com");

    assert!(!has_spf(&stub, "example.com").await);
    assert!(!has_spf(&stub, "").await);
}

#[tokio::test]
async fn check_policies_combines_findings() {
    let mut stub = StubResolver::new();
    stub.insert_records("example.com", vec!["v=spf1 ip4:192.0.2.1 ~all"]);
    stub.insert_records(
        "_dmarc.example.com",
        vec!["v=DMARC1; p=none; rua=mailto:d@example.com"],
    );

    let status = check_policies(&stub, "example.com").await;
    assert_eq!(
        status,
        PolicyStatus {
            has_spf: true,
            has_dmarc: true
        }
    );

    let status = check_policies(&stub, "other.example").await;
    assert_eq!(status, PolicyStatus::default());
}
