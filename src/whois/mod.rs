//! WHOIS domain registration lookup.
//!
//! [`WhoisClient`] fetches the raw answer with the `whois-service` crate and
//! [`parse_whois_text`] turns it into a [`WhoisRecord`]. The prober only sees
//! the [`WhoisSource`] trait.

mod client;
mod parse;
mod types;

use async_trait::async_trait;

use crate::error_handling::ProbeError;

// Re-export public API
pub use client::WhoisClient;
pub use parse::{is_not_found, parse_date_string, parse_whois_text};
pub use types::{Contacts, WhoisRecord};

/// Fetches the WHOIS record of a registered domain.
#[async_trait]
pub trait WhoisSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `ProbeError::Whois` when no record can be obtained (server
    /// unreachable, unknown TLD, domain not registered) and
    /// `ProbeError::Timeout` when the lookup does not finish in time.
    async fn fetch(&self, domain: &str) -> Result<WhoisRecord, ProbeError>;
}
