//! Forward resolution with canonical-name extraction.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::proto::rr::{Record, RecordType};
use hickory_resolver::TokioAsyncResolver;

use super::extract::fully_qualified;
use crate::error_handling::ProbeError;

/// Outcome of resolving one hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// First address in the answer
    pub ip: IpAddr,
    /// End of the CNAME chain, fully-qualified (trailing dot)
    pub canonical_name: String,
}

/// Resolves a hostname to an address and its canonical name.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// # Errors
    ///
    /// Returns `ProbeError::Dns` if the name does not resolve or the answer
    /// holds no address.
    async fn resolve(&self, host: &str) -> Result<Resolution, ProbeError>;
}

/// [`Resolve`] implementation backed by a shared hickory resolver.
#[derive(Clone)]
pub struct HickoryResolver {
    resolver: Arc<TokioAsyncResolver>,
}

impl HickoryResolver {
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Resolve for HickoryResolver {
    async fn resolve(&self, host: &str) -> Result<Resolution, ProbeError> {
        let response = self
            .resolver
            .lookup_ip(host)
            .await
            .map_err(|e| ProbeError::Dns {
                host: host.to_string(),
                message: e.to_string(),
            })?;

        let ip = response.iter().next().ok_or_else(|| ProbeError::Dns {
            host: host.to_string(),
            message: "No IP addresses found".to_string(),
        })?;

        let canonical_name = canonical_name_from_records(response.as_lookup().record_iter(), host);
        log::debug!("Resolved {} to {} (canonical {})", host, ip, canonical_name);

        Ok(Resolution { ip, canonical_name })
    }
}

/// Picks the canonical name out of an answer section.
///
/// The owner of the first A/AAAA record is the end of the CNAME chain. When
/// the answer holds no address record the queried name itself is canonical.
///
/// # Arguments
///
/// * `records` - Answer records, in wire order
/// * `queried` - The name that was looked up
pub fn canonical_name_from_records<'a>(
    mut records: impl Iterator<Item = &'a Record>,
    queried: &str,
) -> String {
    let owner = records
        .find(|record| matches!(record.record_type(), RecordType::A | RecordType::AAAA))
        .map(|record| record.name().to_utf8());

    fully_qualified(&owner.unwrap_or_else(|| queried.to_string()))
}
