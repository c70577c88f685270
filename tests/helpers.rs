// Shared test helpers: in-memory resolver and WHOIS stubs and app state setup.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url_whois::dns::{Resolution, Resolve};
use url_whois::whois::{WhoisRecord, WhoisSource};
use url_whois::{AppState, DomainProber, ProbeError, ResponseCache};

/// Resolver answering from a fixed table; unknown names fail like NXDOMAIN.
pub struct StubResolver {
    answers: HashMap<String, Resolution>,
}

impl StubResolver {
    pub fn new(answers: &[(&str, &str, &str)]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(host, ip, cname)| {
                    (
                        host.to_string(),
                        Resolution {
                            ip: ip.parse().expect("valid test IP"),
                            canonical_name: cname.to_string(),
                        },
                    )
                })
                .collect(),
        }
    }
}

#[async_trait]
impl Resolve for StubResolver {
    async fn resolve(&self, host: &str) -> Result<Resolution, ProbeError> {
        self.answers
            .get(host)
            .cloned()
            .ok_or_else(|| ProbeError::Dns {
                host: host.to_string(),
                message: "NXDOMAIN".to_string(),
            })
    }
}

/// WHOIS source returning one canned record for every domain and counting calls.
pub struct CountingWhois {
    pub record: WhoisRecord,
    pub calls: AtomicUsize,
    /// Artificial latency per fetch
    pub delay: Duration,
}

impl CountingWhois {
    pub fn new(record: WhoisRecord) -> Self {
        Self {
            record,
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    #[allow(dead_code)] // Used by other test files
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WhoisSource for CountingWhois {
    async fn fetch(&self, _domain: &str) -> Result<WhoisRecord, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.record.clone())
    }
}

/// WHOIS record resembling a registry answer for methyldragon.com.
pub fn sample_whois() -> WhoisRecord {
    WhoisRecord {
        registrars: vec!["NameCheap, Inc.".to_string()],
        creation_dates: vec!["2017-07-11T05:21:09Z".to_string()],
        updated_dates: vec!["2023-06-01T08:12:44Z".to_string()],
        expiration_dates: vec!["2025-07-11T05:21:09Z".to_string()],
        nameservers: vec![
            "dns1.registrar-servers.com".to_string(),
            "dns2.registrar-servers.com".to_string(),
        ],
        ..Default::default()
    }
}

/// Resolver knowing methyldragon.com and www.methyldragon.com.
pub fn sample_resolver() -> StubResolver {
    StubResolver::new(&[
        ("methyldragon.com", "185.199.108.153", "methyldragon.com."),
        (
            "www.methyldragon.com",
            "185.199.109.153",
            "methyldragon.github.io.",
        ),
    ])
}

/// App state around the given stubs, without GeoIP.
pub fn test_state(resolver: StubResolver, whois: Arc<CountingWhois>) -> AppState {
    AppState {
        prober: Arc::new(DomainProber::new(Arc::new(resolver), whois)),
        cache: ResponseCache::new(Duration::from_secs(60)),
        probe_timeout: Duration::from_secs(5),
    }
}
