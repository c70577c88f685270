//! url_whois library: website WHOIS, DNS and GeoIP aggregation
//!
//! This library answers "what is this website, where does it run, who
//! registered it?" by combining a WHOIS record, forward DNS for the bare and
//! `www.` names, and offline GeoLite2 lookups into one [`ProbeResult`], served
//! over HTTP with a time-to-live cache.
//!
//! # Example
//!
//! ```no_run
//! use url_whois::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     bind: "127.0.0.1:5000".to_string(),
//!     geoip_optional: true,
//!     ..Default::default()
//! };
//!
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod cache;
pub mod config;
pub mod dns;
mod error_handling;
pub mod geoip;
pub mod initialization;
pub mod probe;
mod run;
pub mod server;
pub mod whois;

// Re-export public API
pub use app::normalize;
pub use cache::ResponseCache;
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{InitializationError, ProbeError};
pub use probe::{DomainProber, ProbeResult};
pub use run::{init_app_state, run_server};
pub use server::{build_router, AppState};
