//! Domain probing: one website in, one merged record out.

mod prober;
mod types;

// Re-export public API
pub use prober::DomainProber;
pub use types::{DomainRecord, LocationData, ProbeResult, ServerInfo, ServerRecord};

#[cfg(test)]
mod tests;
