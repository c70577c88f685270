//! DNS resolver initialization.
//!
//! Two resolvers can exist: the default one (system configuration) used for
//! address lookups, and an optional one pinned to a user-chosen DNS server and
//! used only for canonical-name lookups.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS};
use crate::error_handling::InitializationError;

/// Resolver options shared by every resolver the service builds.
///
/// `ndots = 0` keeps search domains from being appended to probed names.
fn resolver_opts(mut opts: ResolverOpts) -> ResolverOpts {
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = DNS_ATTEMPTS;
    opts.ndots = 0;
    opts
}

/// Initializes the default DNS resolver.
///
/// Uses the system configuration (`/etc/resolv.conf` on Unix). If it cannot
/// be read, falls back to hickory's default upstreams.
///
/// # Returns
///
/// A configured `TokioAsyncResolver` wrapped in `Arc` for sharing across tasks.
///
/// # Errors
///
/// Currently infallible in practice; the `Result` keeps the bootstrap
/// signature uniform with the other initializers.
pub fn init_resolver() -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    let (config, opts) = match hickory_resolver::system_conf::read_system_conf() {
        Ok((config, opts)) => (config, opts),
        Err(e) => {
            log::warn!(
                "Failed to read system DNS configuration ({}), using default upstreams",
                e
            );
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };

    Ok(Arc::new(TokioAsyncResolver::tokio(
        config,
        resolver_opts(opts),
    )))
}

/// Initializes a resolver that only talks to `server` on port 53.
///
/// `server` may be an IP address or a hostname; a hostname is resolved once
/// with `bootstrap`.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the server hostname does
/// not resolve.
pub async fn init_pinned_resolver(
    server: &str,
    bootstrap: &TokioAsyncResolver,
) -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    let ip = match server.parse::<IpAddr>() {
        Ok(ip) => ip,
        Err(_) => {
            let response = bootstrap.lookup_ip(server).await.map_err(|e| {
                InitializationError::DnsResolverError(format!(
                    "Failed to resolve DNS server {}: {}",
                    server, e
                ))
            })?;
            response.iter().next().ok_or_else(|| {
                InitializationError::DnsResolverError(format!(
                    "DNS server {} has no address",
                    server
                ))
            })?
        }
    };

    log::info!("Canonical-name lookups pinned to DNS server {} ({})", server, ip);

    let name_servers = NameServerConfigGroup::from_ips_clear(&[ip], 53, true);
    let config = ResolverConfig::from_parts(None, vec![], name_servers);

    Ok(Arc::new(TokioAsyncResolver::tokio(
        config,
        resolver_opts(ResolverOpts::default()),
    )))
}
