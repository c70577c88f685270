//! Configuration constants.
//!
//! This module defines the constants used throughout the service, including
//! timeouts, size limits, cache parameters and default locations.

use std::time::Duration;

/// Default address the HTTP front-end binds to
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// API path prefix for probe requests
pub const API_PREFIX: &str = "/url_whois/api/v1.0";

// Network operation timeouts
/// DNS query timeout in seconds
/// Most DNS queries complete in <1s, 3s fails fast on unresponsive servers
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// DNS attempts per query (initial + 1 retry inside the resolver)
pub const DNS_ATTEMPTS: usize = 2;
/// Timeout for a whole WHOIS lookup (referrals included) in seconds
/// whois-service's own default is 30s
pub const WHOIS_TIMEOUT_SECS: u64 = 5;
/// Upper bound for an entire probe, enforced by the HTTP layer
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

// Response cache
/// Response cache TTL in seconds (1 day)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;
/// Maximum number of cached probe results
pub const CACHE_MAX_CAPACITY: u64 = 10_000;

// GeoIP databases
/// Default directory holding the GeoLite2 databases
pub const DEFAULT_GEOIP_DIR: &str = "GeoLite2_DBs";
/// Environment variable name for MaxMind license key
pub const MAXMIND_LICENSE_KEY_ENV: &str = "MAXMIND_LICENSE_KEY";
/// MaxMind download base URL
pub const MAXMIND_DOWNLOAD_BASE: &str = "https://download.maxmind.com/app/geoip_download";
/// Maximum GeoIP archive size in bytes (200MB)
/// GeoLite2-City is ~70MB compressed; the cap rejects runaway downloads
pub const MAX_GEOIP_DOWNLOAD_SIZE: usize = 200 * 1024 * 1024;
/// Timeout for a single GeoIP archive download
pub const GEOIP_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Date format used for the human-readable WHOIS date fields
pub const WHOIS_DATE_FORMAT: &str = "%Y-%m-%d %H-%M-%S";
