//! Main application helpers.
//!
//! This module provides URL normalization and shutdown handling used by the
//! HTTP front-end and the binary.

pub mod shutdown;
pub mod url;

// Re-export public API
pub use shutdown::shutdown_signal;
pub use url::normalize;
