//! Probe module tests, driven by in-memory resolver, WHOIS and GeoIP stubs.

use super::*;
use crate::dns::{Resolution, Resolve};
use crate::error_handling::ProbeError;
use crate::geoip::{CityRecord, GeoLookup};
use crate::whois::{WhoisRecord, WhoisSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct StubResolver {
    answers: HashMap<String, Resolution>,
}

impl StubResolver {
    fn new(answers: &[(&str, &str, &str)]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(host, ip, cname)| {
                    (
                        host.to_string(),
                        Resolution {
                            ip: ip.parse().unwrap(),
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
        self.answers.get(host).cloned().ok_or_else(|| ProbeError::Dns {
            host: host.to_string(),
            message: "NXDOMAIN".to_string(),
        })
    }
}

struct StubWhois {
    record: Option<WhoisRecord>,
    calls: AtomicUsize,
    queried: std::sync::Mutex<Vec<String>>,
}

impl StubWhois {
    fn new(record: Option<WhoisRecord>) -> Self {
        Self {
            record,
            calls: AtomicUsize::new(0),
            queried: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl WhoisSource for StubWhois {
    async fn fetch(&self, domain: &str) -> Result<WhoisRecord, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queried.lock().unwrap().push(domain.to_string());
        self.record.clone().ok_or_else(|| ProbeError::Whois {
            domain: domain.to_string(),
            message: "No match".to_string(),
        })
    }
}

/// Knows city data for one IP, country data for another, ASN for both.
struct StubGeo {
    city_ip: IpAddr,
    country_ip: IpAddr,
}

impl GeoLookup for StubGeo {
    fn city(&self, ip: IpAddr) -> Option<CityRecord> {
        (ip == self.city_ip).then(|| CityRecord {
            city: Some("San Francisco".to_string()),
            postal_code: None,
            latitude: Some(37.7697),
            longitude: Some(-122.3933),
            accuracy_radius_km: Some(1000),
        })
    }

    fn country(&self, ip: IpAddr) -> Option<String> {
        (ip == self.country_ip).then(|| "United States".to_string())
    }

    fn network_operator(&self, _ip: IpAddr) -> Option<String> {
        Some("FASTLY".to_string())
    }
}

fn example_whois() -> WhoisRecord {
    let mut record = WhoisRecord {
        registrars: vec!["NameCheap, Inc.".to_string(), "NAMECHEAP INC".to_string()],
        creation_dates: vec!["2017-07-11T05:21:09Z".to_string()],
        updated_dates: vec!["2023-06-01T08:12:44Z".to_string()],
        expiration_dates: vec!["2025-07-11T05:21:09Z".to_string()],
        nameservers: vec![
            "dns1.registrar-servers.com".to_string(),
            "dns2.registrar-servers.com".to_string(),
        ],
        status: vec!["clientTransferProhibited".to_string()],
        ..Default::default()
    };
    record
        .contacts
        .entry("registrant".to_string())
        .or_default()
        .insert("country".to_string(), "IS".to_string());
    record
}

fn example_resolver() -> StubResolver {
    StubResolver::new(&[
        ("example.com", "185.199.108.153", "example.com."),
        (
            "www.example.com",
            "185.199.109.153",
            "example.github.io.",
        ),
    ])
}

fn prober_with(whois: Arc<StubWhois>) -> DomainProber {
    DomainProber::new(Arc::new(example_resolver()), whois)
}

#[tokio::test]
async fn test_probe_builds_full_result() {
    let prober = prober_with(Arc::new(StubWhois::new(Some(example_whois()))));

    let result = prober.probe("http://www.example.com").await.unwrap();

    assert_eq!(result.initial_query, "http://www.example.com");
    assert_eq!(result.domain_info.query, "example.com");
    assert_eq!(result.domain_info.registrar.as_deref(), Some("NameCheap, Inc."));
    assert_eq!(result.domain_info.nameservers.len(), 2);
    assert_eq!(result.domain_info.contacts["registrant"]["country"], "IS");
    assert_eq!(
        result.domain_info.creation_date.as_deref(),
        Some("2017-07-11 05-21-09")
    );
    assert_eq!(result.domain_info.creation_date_unix, Some(1_499_750_469));

    let no_prefix = &result.server_info.no_prefix;
    assert_eq!(no_prefix.query, "example.com");
    assert_eq!(no_prefix.cname, "example.com.");
    assert_eq!(no_prefix.server_type.as_deref(), Some("example"));
    assert_eq!(no_prefix.ip.to_string(), "185.199.108.153");

    let www_prefix = &result.server_info.www_prefix;
    assert_eq!(www_prefix.query, "www.example.com");
    assert_eq!(www_prefix.cname, "example.github.io.");
    assert_eq!(www_prefix.server_type.as_deref(), Some("example"));
    assert_eq!(www_prefix.ip.to_string(), "185.199.109.153");
}

#[tokio::test]
async fn test_probe_queries_whois_for_bare_name_only() {
    let whois = Arc::new(StubWhois::new(Some(example_whois())));
    let prober = prober_with(Arc::clone(&whois));

    prober.probe("https://www.example.com").await.unwrap();

    assert_eq!(whois.calls.load(Ordering::SeqCst), 1);
    assert_eq!(*whois.queried.lock().unwrap(), vec!["example.com"]);
}

#[tokio::test]
async fn test_probe_bare_dns_failure_aborts() {
    let resolver = StubResolver::new(&[("www.example.com", "192.0.2.1", "www.example.com.")]);
    let prober = DomainProber::new(
        Arc::new(resolver),
        Arc::new(StubWhois::new(Some(example_whois()))),
    );

    let err = prober.probe("example.com").await.unwrap_err();
    match err {
        ProbeError::Dns { host, .. } => assert_eq!(host, "example.com"),
        other => panic!("expected DNS error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_probe_www_dns_failure_aborts() {
    let resolver = StubResolver::new(&[("example.com", "192.0.2.1", "example.com.")]);
    let prober = DomainProber::new(
        Arc::new(resolver),
        Arc::new(StubWhois::new(Some(example_whois()))),
    );

    let err = prober.probe("example.com").await.unwrap_err();
    assert!(matches!(err, ProbeError::Dns { ref host, .. } if host == "www.example.com"));
}

#[tokio::test]
async fn test_probe_whois_failure_aborts() {
    let prober = prober_with(Arc::new(StubWhois::new(None)));

    let err = prober.probe("example.com").await.unwrap_err();
    assert_eq!(err.kind(), "whois");
}

#[tokio::test]
async fn test_probe_empty_hostname() {
    let whois = Arc::new(StubWhois::new(Some(example_whois())));
    let prober = prober_with(Arc::clone(&whois));

    let err = prober.probe("https://www.").await.unwrap_err();
    assert_eq!(err.kind(), "dns");
    assert_eq!(whois.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_probe_without_geo_has_empty_location() {
    let prober = prober_with(Arc::new(StubWhois::new(Some(example_whois()))));
    assert!(!prober.has_geo());

    let result = prober.probe("example.com").await.unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["server_info"]["no_prefix"]["location_data"], serde_json::json!({}));
    assert!(json["server_info"]["no_prefix"].get("network_operator").is_none());
}

#[tokio::test]
async fn test_probe_geo_fields_are_independent() {
    let geo = StubGeo {
        city_ip: "185.199.108.153".parse().unwrap(),
        country_ip: "185.199.109.153".parse().unwrap(),
    };
    let prober = prober_with(Arc::new(StubWhois::new(Some(example_whois()))))
        .with_geo(Arc::new(geo));

    let result = prober.probe("example.com").await.unwrap();

    let bare = &result.server_info.no_prefix;
    assert_eq!(bare.location_data.city.as_deref(), Some("San Francisco"));
    assert_eq!(bare.location_data.uncertainty_radius_km, Some(1000));
    assert_eq!(bare.location_data.postal_code, None);
    assert_eq!(bare.location_data.country, None);
    assert_eq!(bare.network_operator.as_deref(), Some("FASTLY"));

    let www = &result.server_info.www_prefix;
    assert_eq!(www.location_data.city, None);
    assert_eq!(www.location_data.latitude, None);
    assert_eq!(www.location_data.country.as_deref(), Some("United States"));
    assert_eq!(www.network_operator.as_deref(), Some("FASTLY"));
}

#[tokio::test]
async fn test_probe_date_groups_are_independent() {
    let mut whois = example_whois();
    whois.updated_dates = vec!["last tuesday".to_string()];
    whois.expiration_dates.clear();
    let prober = prober_with(Arc::new(StubWhois::new(Some(whois))));

    let result = prober.probe("example.com").await.unwrap();
    let json = serde_json::to_value(&result.domain_info).unwrap();

    assert_eq!(json["creation_date"], "2017-07-11 05-21-09");
    assert_eq!(json["creation_date_unix"], 1_499_750_469);
    for key in [
        "last_update_date",
        "last_update_date_unix",
        "expiration_date",
        "expiration_date_unix",
    ] {
        assert!(json.get(key).is_none(), "{} should be omitted", key);
    }
}

#[tokio::test]
async fn test_probe_missing_registrar_is_omitted() {
    let mut whois = example_whois();
    whois.registrars.clear();
    let prober = prober_with(Arc::new(StubWhois::new(Some(whois))));

    let result = prober.probe("example.com").await.unwrap();
    let json = serde_json::to_value(&result.domain_info).unwrap();

    assert!(json.get("registrar").is_none());
    assert_eq!(json["query"], "example.com");
}

#[tokio::test]
async fn test_probe_custom_canonical_resolver() {
    let canonical = StubResolver::new(&[
        ("example.com", "203.0.113.1", "example.com."),
        ("www.example.com", "203.0.113.2", "d1.cloudfront.net."),
    ]);
    let prober = prober_with(Arc::new(StubWhois::new(Some(example_whois()))))
        .with_canonical_resolver(Arc::new(canonical));

    let result = prober.probe("example.com").await.unwrap();
    let www = &result.server_info.www_prefix;

    // Address from the default resolver, canonical name from the custom one
    assert_eq!(www.ip.to_string(), "185.199.109.153");
    assert_eq!(www.cname, "d1.cloudfront.net.");
    assert_eq!(www.server_type.as_deref(), Some("cloudfront"));
}

#[tokio::test]
async fn test_probe_result_json_keys() {
    let prober = prober_with(Arc::new(StubWhois::new(Some(example_whois()))));

    let result = prober.probe("example.com").await.unwrap();
    let json = serde_json::to_value(&result).unwrap();

    let server = &json["server_info"]["www_prefix"];
    assert_eq!(server["CNAME"], "example.github.io.");
    assert_eq!(server["ip"], "185.199.109.153");
    assert!(server.get("cname").is_none());
    assert_eq!(json["initial_query"], "example.com");
}
