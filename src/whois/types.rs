use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// `key: value` pairs returned by one WHOIS server. Keys are lower-cased.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhoisRecord {
    pub server: String,
    pub fields: Vec<(String, String)>,
}

impl WhoisRecord {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.trim().to_ascii_lowercase(), value.into()));
        self
    }

    /// Parses a raw response body. Comment lines (`%`, `#`, `>>>`) and lines
    /// without a `:` separator are ignored.
    pub fn parse(server: impl Into<String>, body: &str) -> Self {
        let fields = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with(['%', '#']) && !line.starts_with(">>>"))
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim().to_string()))
            .filter(|(key, value)| !key.is_empty() && !value.is_empty())
            .collect();
        Self {
            server: server.into(),
            fields,
        }
    }

    /// First value stored under `key` (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// A WHOIS answer. Thin registries answer with one record; referral chains
/// produce one record per server contacted.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhoisResponse {
    Single(WhoisRecord),
    Many(Vec<WhoisRecord>),
}

impl WhoisResponse {
    pub fn records(&self) -> &[WhoisRecord] {
        match self {
            Self::Single(record) => std::slice::from_ref(record),
            Self::Many(records) => records.as_slice(),
        }
    }

    pub(crate) fn from_records(mut records: Vec<WhoisRecord>) -> Self {
        if records.len() == 1 {
            Self::Single(records.remove(0))
        } else {
            Self::Many(records)
        }
    }
}

/// Configuration knobs for [`WhoisClient`](super::WhoisClient).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoisOptions {
    pub root_server: String,
    pub port: u16,
    pub timeout: Duration,
    pub follow_referrals: bool,
    pub max_response_bytes: u64,
}

impl Default for WhoisOptions {
    fn default() -> Self {
        Self {
            root_server: "whois.iana.org".to_string(),
            port: 43,
            timeout: Duration::from_secs(5),
            follow_referrals: true,
            max_response_bytes: 64 * 1024,
        }
    }
}
