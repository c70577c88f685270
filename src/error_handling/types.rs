//! Error type definitions.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver (e.g. the custom DNS server does not resolve).
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),

    /// A required GeoIP database file is missing or corrupt.
    #[error("GeoIP database error ({path}): {message}")]
    GeoDatabaseError {
        /// Path of the database file that failed to open
        path: String,
        /// Underlying reader error
        message: String,
    },

    /// The HTTP listener could not be bound.
    #[error("Failed to bind HTTP server to {addr}: {message}")]
    BindError {
        /// Requested bind address
        addr: String,
        /// Underlying I/O error
        message: String,
    },
}

/// A mandatory lookup failed and the probe was aborted.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// DNS resolution failed for one of the hostname variants.
    #[error("DNS lookup failed for {host}: {message}")]
    Dns {
        /// Hostname that failed to resolve
        host: String,
        /// Resolver error message
        message: String,
    },

    /// WHOIS fetch failed for the bare hostname.
    #[error("WHOIS lookup failed for {domain}: {message}")]
    Whois {
        /// Domain that was queried
        domain: String,
        /// Reason for the failure
        message: String,
    },

    /// A mandatory lookup did not complete in time.
    #[error("{stage} lookup for {target} timed out after {secs}s")]
    Timeout {
        /// Which lookup timed out ("DNS", "WHOIS", "probe")
        stage: &'static str,
        /// Hostname or server the lookup was for
        target: String,
        /// Timeout that was exceeded
        secs: u64,
    },
}

impl ProbeError {
    /// Short machine-readable category for logs and HTTP error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::Dns { .. } => "dns",
            ProbeError::Whois { .. } => "whois",
            ProbeError::Timeout { .. } => "timeout",
        }
    }

    /// Returns `true` if the error is a timeout rather than a negative answer.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProbeError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_error_display_dns() {
        let err = ProbeError::Dns {
            host: "example.invalid".to_string(),
            message: "no record found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "DNS lookup failed for example.invalid: no record found"
        );
        assert_eq!(err.kind(), "dns");
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_probe_error_display_timeout() {
        let err = ProbeError::Timeout {
            stage: "WHOIS",
            target: "whois.verisign-grs.com".to_string(),
            secs: 5,
        };
        assert_eq!(
            err.to_string(),
            "WHOIS lookup for whois.verisign-grs.com timed out after 5s"
        );
        assert_eq!(err.kind(), "timeout");
        assert!(err.is_timeout());
    }

    #[test]
    fn test_geo_database_error_mentions_path() {
        let err = InitializationError::GeoDatabaseError {
            path: "GeoLite2_DBs/GeoLite2-ASN.mmdb".to_string(),
            message: "No such file or directory".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("GeoLite2-ASN.mmdb"));
        assert!(msg.contains("No such file"));
    }
}
