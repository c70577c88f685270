//! Error types.
//!
//! Errors are split by how far they propagate:
//! - **Initialization errors**: a required resource (logger, resolver, GeoIP
//!   database, listener) could not be set up; startup halts.
//! - **Probe errors**: a mandatory lookup (DNS for either hostname variant, WHOIS
//!   for the bare hostname) failed; the probe is aborted with no partial result.
//!
//! Optional enrichment (registrar, individual date groups, GeoIP fields) never
//! produces an error value. A failed optional lookup is simply an absent field.

mod types;

// Re-export public API
pub use types::{InitializationError, ProbeError};
