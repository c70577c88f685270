//! DNS resolution for probed hostnames.
//!
//! This module provides async DNS operations using `hickory-resolver`:
//! - IP address resolution (A/AAAA records)
//! - Canonical name extraction from the CNAME chain of the same answer
//! - The `server_type` label derived from a canonical name
//!
//! The prober depends on the [`Resolve`] trait, not on hickory directly.

mod extract;
mod resolution;

// Re-export public API
pub use extract::{fully_qualified, server_type};
pub use resolution::{canonical_name_from_records, HickoryResolver, Resolution, Resolve};
