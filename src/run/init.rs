//! Service resource initialization.
//!
//! Everything the HTTP layer needs is built here, once, before the listener
//! is bound: GeoIP databases (optionally refreshed first), DNS resolvers, the
//! WHOIS client, the prober and the response cache.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::dns::HickoryResolver;
use crate::geoip::{update_geolite_dbs, GeoDatabases, GeoIpSource, GeoLookup};
use crate::initialization::{init_pinned_resolver, init_resolver};
use crate::probe::DomainProber;
use crate::server::AppState;
use crate::whois::WhoisClient;

/// Initialize all resources needed to serve lookups.
///
/// This function performs the following steps:
/// 1. Refresh the GeoLite2 databases if `--update-geoip` is set
/// 2. Open the GeoLite2 databases
/// 3. Initialize the default DNS resolver and, with `--dns-server`, a pinned one
/// 4. Assemble the prober and the response cache
///
/// # Errors
///
/// Fails if the GeoIP databases cannot be opened (unless `--geoip-optional`)
/// or if the custom DNS server does not resolve. A failed GeoIP refresh is
/// only a warning: the files already on disk are used.
pub async fn init_app_state(config: &Config) -> Result<AppState> {
    if config.update_geoip {
        refresh_geoip(config).await;
    }

    let geo = open_geoip(config)?;

    let resolver = init_resolver().context("Failed to initialize DNS resolver")?;
    let mut prober = DomainProber::new(
        Arc::new(HickoryResolver::new(Arc::clone(&resolver))),
        Arc::new(WhoisClient::new()),
    );

    if let Some(server) = config.dns_server.as_deref() {
        let pinned = init_pinned_resolver(server, &resolver)
            .await
            .context("Failed to initialize custom DNS resolver")?;
        prober = prober.with_canonical_resolver(Arc::new(HickoryResolver::new(pinned)));
    }

    if let Some(geo) = geo {
        prober = prober.with_geo(geo);
    }

    info!(
        "Response cache TTL {}s, probe timeout {}s",
        config.cache_ttl_secs, config.probe_timeout_secs
    );

    Ok(AppState {
        prober: Arc::new(prober),
        cache: ResponseCache::new(Duration::from_secs(config.cache_ttl_secs)),
        probe_timeout: Duration::from_secs(config.probe_timeout_secs),
    })
}

async fn refresh_geoip(config: &Config) {
    let source = match GeoIpSource::from_settings(config.geoip_source.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            warn!("Skipping GeoIP update: {:#}", e);
            return;
        }
    };

    match update_geolite_dbs(&config.geoip_dir, &source).await {
        Ok(paths) => info!("Updated {} GeoIP databases", paths.len()),
        Err(e) => warn!(
            "GeoIP update failed, using databases already in {}: {:#}",
            config.geoip_dir.display(),
            e
        ),
    }
}

fn open_geoip(config: &Config) -> Result<Option<Arc<dyn GeoLookup>>> {
    match GeoDatabases::open(&config.geoip_dir) {
        Ok(databases) => {
            for db in databases.metadata() {
                info!(
                    "GeoIP {} built {}",
                    db.database_type,
                    chrono::DateTime::from_timestamp(db.build_epoch as i64, 0)
                        .map(|dt| dt.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| db.build_epoch.to_string())
                );
            }
            Ok(Some(Arc::new(databases)))
        }
        Err(e) if config.geoip_optional => {
            warn!("{}; continuing without geolocation", e);
            Ok(None)
        }
        Err(e) => Err(e).context(
            "GeoIP databases are required (run with --update-geoip, or --geoip-optional to skip)",
        ),
    }
}
