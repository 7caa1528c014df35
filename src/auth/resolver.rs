use async_trait::async_trait;
use trust_dns_resolver::{
    error::{ResolveError, ResolveErrorKind},
    lookup::TxtLookup,
};

use crate::dns::DnsClient;

use super::AuthError;

pub(crate) fn normalize_domain(domain: &str) -> Result<String, AuthError> {
    let trimmed = domain.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(AuthError::EmptyDomain);
    }
    Ok(trimmed.to_ascii_lowercase())
}

pub(crate) fn fqdn(label: &str, domain: &str) -> String {
    let trimmed = label.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        domain.to_string()
    } else {
        format!("{}.{}", trimmed.to_ascii_lowercase(), domain)
    }
}

/// Source of TXT records. A name with no TXT data yields an empty list.
#[async_trait]
pub trait LookupTxt: Send + Sync {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, AuthError>;
}

#[async_trait]
impl LookupTxt for DnsClient {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, AuthError> {
        let lookup = tokio::time::timeout(self.budget(), self.resolver().txt_lookup(name))
            .await
            .map_err(|_| AuthError::timeout(name, self.budget()))?;
        let lookup = match lookup {
            Ok(lookup) => lookup,
            Err(err) => {
                if should_treat_as_empty(&err) {
                    return Ok(Vec::new());
                }
                return Err(AuthError::txt_lookup(name, err));
            }
        };
        Ok(collect_txt_records(&lookup))
    }
}

// Les segments d'un même TXT sont concaténés; l'UTF-8 invalide est remplacé.
fn collect_txt_records(lookup: &TxtLookup) -> Vec<String> {
    lookup
        .iter()
        .map(|txt| {
            txt.txt_data()
                .iter()
                .map(|piece| String::from_utf8_lossy(piece))
                .collect::<String>()
        })
        .collect()
}

fn should_treat_as_empty(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}
