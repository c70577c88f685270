//! WHOIS lookups through the `whois-service` crate.
//!
//! The crate follows IANA and registrar referrals itself. This wrapper bounds
//! the whole lookup in time and re-parses the raw answer, since the crate's
//! parsed view keeps only one value per field and no contacts.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use whois_service::WhoisClient as ServiceClient;

use super::parse::{is_not_found, parse_whois_text};
use super::types::WhoisRecord;
use super::WhoisSource;
use crate::config::WHOIS_TIMEOUT_SECS;
use crate::error_handling::ProbeError;

/// WHOIS client with a bounded lookup time.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    timeout: Duration,
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WhoisClient {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(WHOIS_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs `lookup` for at most the configured timeout.
    async fn bounded<F>(&self, domain: &str, lookup: F) -> Result<String, ProbeError>
    where
        F: Future<Output = Result<String, String>>,
    {
        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(raw)) => Ok(raw),
            Ok(Err(message)) => Err(ProbeError::Whois {
                domain: domain.to_string(),
                message,
            }),
            Err(_) => Err(ProbeError::Timeout {
                stage: "WHOIS",
                target: domain.to_string(),
                secs: self.timeout.as_secs(),
            }),
        }
    }
}

/// Turns a raw WHOIS answer into a record, rejecting unregistered names.
pub(crate) fn record_from_raw(domain: &str, raw: &str) -> Result<WhoisRecord, ProbeError> {
    if is_not_found(raw) {
        return Err(ProbeError::Whois {
            domain: domain.to_string(),
            message: "no record (domain not registered)".to_string(),
        });
    }
    Ok(parse_whois_text(raw))
}

#[async_trait]
impl WhoisSource for WhoisClient {
    async fn fetch(&self, domain: &str) -> Result<WhoisRecord, ProbeError> {
        let domain = domain.trim_end_matches('.');
        if domain.is_empty() {
            return Err(ProbeError::Whois {
                domain: domain.to_string(),
                message: "empty domain".to_string(),
            });
        }

        log::debug!("Starting WHOIS lookup for domain: {}", domain);
        let raw = self
            .bounded(domain, async {
                let client = ServiceClient::new()
                    .await
                    .map_err(|e| format!("failed to create WHOIS client: {}", e))?;
                client
                    .lookup(domain)
                    .await
                    .map(|response| response.raw_data)
                    .map_err(|e| e.to_string())
            })
            .await?;

        record_from_raw(domain, &raw)
    }
}
