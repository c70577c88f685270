//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_CACHE_TTL_SECS, DEFAULT_GEOIP_DIR, DEFAULT_PROBE_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Service configuration.
///
/// Parsed from the command line (every flag also reads an `URL_WHOIS_*`
/// environment variable), or constructed programmatically.
///
/// # Examples
///
/// ```no_run
/// use url_whois::Config;
///
/// let config = Config {
///     bind: "0.0.0.0:8080".to_string(),
///     geoip_optional: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "url_whois", version, about = "WHOIS + DNS + GeoIP lookups for a website, served as JSON")]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, env = "URL_WHOIS_BIND", default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,

    /// Log level
    #[arg(long, env = "URL_WHOIS_LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, env = "URL_WHOIS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Directory holding GeoLite2-City.mmdb, GeoLite2-Country.mmdb and GeoLite2-ASN.mmdb
    #[arg(long, env = "URL_WHOIS_GEOIP_DIR", default_value = DEFAULT_GEOIP_DIR)]
    pub geoip_dir: PathBuf,

    /// Download fresh GeoLite2 databases before starting
    #[arg(long, env = "URL_WHOIS_UPDATE_GEOIP")]
    pub update_geoip: bool,

    /// Base URL serving <edition>.tar.gz archives (defaults to MaxMind with MAXMIND_LICENSE_KEY)
    #[arg(long, env = "URL_WHOIS_GEOIP_SOURCE")]
    pub geoip_source: Option<String>,

    /// Start without geolocation enrichment if the databases cannot be opened
    #[arg(long, env = "URL_WHOIS_GEOIP_OPTIONAL")]
    pub geoip_optional: bool,

    /// DNS server (hostname or IP) used for canonical-name lookups
    #[arg(long, env = "URL_WHOIS_DNS_SERVER")]
    pub dns_server: Option<String>,

    /// Response cache time-to-live in seconds
    #[arg(long, env = "URL_WHOIS_CACHE_TTL_SECS", default_value_t = DEFAULT_CACHE_TTL_SECS)]
    pub cache_ttl_secs: u64,

    /// Upper bound for a single probe in seconds
    #[arg(long, env = "URL_WHOIS_PROBE_TIMEOUT_SECS", default_value_t = DEFAULT_PROBE_TIMEOUT_SECS)]
    pub probe_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDR.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            geoip_dir: PathBuf::from(DEFAULT_GEOIP_DIR),
            update_geoip: false,
            geoip_source: None,
            geoip_optional: false,
            dns_server: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
        }
    }
}
