use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::whois::error::WhoisError;
use crate::whois::types::{WhoisOptions, WhoisRecord, WhoisResponse};

/// WHOIS collaborator used for the domain-age signal.
#[async_trait]
pub trait WhoisLookup: Send + Sync {
    async fn lookup(&self, domain: &str) -> Result<WhoisResponse, WhoisError>;
}

/// Plain port-43 client. Starts at the root server, then follows the
/// registry `refer:` and the `Registrar WHOIS Server:` hints.
#[derive(Debug, Clone, Default)]
pub struct WhoisClient {
    options: WhoisOptions,
}

impl WhoisClient {
    pub fn new(options: WhoisOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WhoisOptions {
        &self.options
    }

    async fn query(&self, server: &str, domain: &str) -> Result<WhoisRecord, WhoisError> {
        let after = self.options.timeout;
        match tokio::time::timeout(after, self.exchange(server, domain)).await {
            Ok(result) => result,
            Err(_) => Err(WhoisError::timeout(server, after)),
        }
    }

    async fn exchange(&self, server: &str, domain: &str) -> Result<WhoisRecord, WhoisError> {
        let mut stream = TcpStream::connect((server, self.options.port))
            .await
            .map_err(|e| WhoisError::connect(server, e))?;
        stream
            .write_all(format!("{domain}\r\n").as_bytes())
            .await
            .map_err(|e| WhoisError::io(server, e))?;

        let mut raw = Vec::new();
        stream
            .take(self.options.max_response_bytes)
            .read_to_end(&mut raw)
            .await
            .map_err(|e| WhoisError::io(server, e))?;
        debug!(server, bytes = raw.len(), "WHOIS response received");

        Ok(WhoisRecord::parse(server, &String::from_utf8_lossy(&raw)))
    }
}

#[async_trait]
impl WhoisLookup for WhoisClient {
    async fn lookup(&self, domain: &str) -> Result<WhoisResponse, WhoisError> {
        let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
        if domain.is_empty() {
            return Err(WhoisError::EmptyDomain);
        }

        let root = self.options.root_server.clone();
        let first = self.query(&root, &domain).await?;
        let mut records = vec![first];

        if self.options.follow_referrals {
            let mut visited = vec![root];
            for key in ["refer", "registrar whois server"] {
                let Some(next) = records.last().and_then(|r| r.get(key)).map(referral_host)
                else {
                    continue;
                };
                if next.is_empty() || visited.contains(&next) {
                    continue;
                }
                // un referral qui échoue ne fait pas perdre la réponse déjà reçue
                match self.query(&next, &domain).await {
                    Ok(record) => records.push(record),
                    Err(err) => {
                        warn!(server = %next, error = %err, "WHOIS referral failed");
                        break;
                    }
                }
                visited.push(next);
            }
        }

        Ok(WhoisResponse::from_records(records))
    }
}

/// Strips a `whois://` scheme and any `:port` suffix from a referral value.
fn referral_host(value: &str) -> String {
    let value = value.trim();
    let value = value
        .strip_prefix("whois://")
        .or_else(|| value.strip_prefix("rwhois://"))
        .unwrap_or(value);
    let host = value.split(['/', ' ']).next().unwrap_or_default();
    let host = match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    };
    host.trim_end_matches('.').to_ascii_lowercase()
}
