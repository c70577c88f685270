//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `url_whois` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//!
//! All service functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use url_whois::initialization::init_logger_with;
use url_whois::{run_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // MAXMIND_LICENSE_KEY and URL_WHOIS_* may live in .env, either in the
    // current directory or next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run_server(config).await {
        log::error!("{:#}", e);
        eprintln!("url_whois error: {:#}", e);
        process::exit(1);
    }

    Ok(())
}
