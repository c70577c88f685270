//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the process-wide pieces the
//! server needs before it can accept requests:
//! - Logger
//! - DNS resolvers (default and optionally pinned to a custom server)
//!
//! All initialization functions return `InitializationError` on failure.

mod logger;
mod resolver;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::{init_pinned_resolver, init_resolver};
