//! The lookup-aggregation routine.

use std::sync::Arc;

use crate::app::normalize;
use crate::dns::{Resolution, Resolve};
use crate::error_handling::ProbeError;
use crate::geoip::GeoLookup;
use crate::whois::WhoisSource;

use super::types::{DomainRecord, ProbeResult, ServerInfo, ServerRecord};

/// Combines DNS, WHOIS and GeoIP lookups into one [`ProbeResult`].
///
/// DNS for both name variants and WHOIS for the bare name are mandatory:
/// if any of them fails the probe fails. Geolocation is best-effort.
#[derive(Clone)]
pub struct DomainProber {
    resolver: Arc<dyn Resolve>,
    canonical_resolver: Option<Arc<dyn Resolve>>,
    whois: Arc<dyn WhoisSource>,
    geo: Option<Arc<dyn GeoLookup>>,
}

impl DomainProber {
    /// Prober without geolocation, taking canonical names from `resolver`.
    pub fn new(resolver: Arc<dyn Resolve>, whois: Arc<dyn WhoisSource>) -> Self {
        Self {
            resolver,
            canonical_resolver: None,
            whois,
            geo: None,
        }
    }

    /// Takes canonical names from a separate resolver (a custom DNS server)
    /// while addresses still come from the default one.
    pub fn with_canonical_resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.canonical_resolver = Some(resolver);
        self
    }

    pub fn with_geo(mut self, geo: Arc<dyn GeoLookup>) -> Self {
        self.geo = Some(geo);
        self
    }

    /// Whether server records get location and network operator fields.
    pub fn has_geo(&self) -> bool {
        self.geo.is_some()
    }

    /// Probes `query`, which may still carry a scheme or `www.` prefix.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::Dns` if either the bare or the `www.` name does
    /// not resolve, and `ProbeError::Whois` / `ProbeError::Timeout` if the
    /// bare name's WHOIS record cannot be fetched.
    pub async fn probe(&self, query: &str) -> Result<ProbeResult, ProbeError> {
        let hostname = normalize(query);
        if hostname.is_empty() {
            return Err(ProbeError::Dns {
                host: hostname,
                message: "empty hostname".to_string(),
            });
        }
        let www_hostname = format!("www.{}", hostname);

        log::debug!("Probing {} (from {:?})", hostname, query);

        let (bare, www, whois) = tokio::try_join!(
            self.resolve_variant(&hostname),
            self.resolve_variant(&www_hostname),
            self.whois.fetch(&hostname),
        )?;

        let mut no_prefix = ServerRecord::new(&hostname, bare.ip, bare.canonical_name);
        let mut www_prefix = ServerRecord::new(&www_hostname, www.ip, www.canonical_name);
        if let Some(geo) = &self.geo {
            no_prefix = no_prefix.with_geo(geo.as_ref());
            www_prefix = www_prefix.with_geo(geo.as_ref());
        }

        log::info!(
            "Probed {}: {} / {}, registrar {}",
            hostname,
            no_prefix.ip,
            www_prefix.ip,
            whois.registrars.first().map(String::as_str).unwrap_or("unknown")
        );

        Ok(ProbeResult {
            initial_query: query.to_string(),
            domain_info: DomainRecord::from_whois(&hostname, &whois),
            server_info: ServerInfo {
                no_prefix,
                www_prefix,
            },
        })
    }

    async fn resolve_variant(&self, host: &str) -> Result<Resolution, ProbeError> {
        let mut resolution = self.resolver.resolve(host).await?;
        if let Some(canonical) = &self.canonical_resolver {
            resolution.canonical_name = canonical.resolve(host).await?.canonical_name;
        }
        Ok(resolution)
    }
}
