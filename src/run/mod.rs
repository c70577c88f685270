//! Service bootstrap: build resources, bind, serve.

mod init;

use anyhow::Result;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error_handling::InitializationError;

pub use init::init_app_state;

/// Runs the HTTP service until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if initialization fails, the bind address is unavailable,
/// or the server stops abnormally.
pub async fn run_server(config: Config) -> Result<()> {
    let state = init_app_state(&config).await?;

    let listener = TcpListener::bind(&config.bind)
        .await
        .map_err(|e| InitializationError::BindError {
            addr: config.bind.clone(),
            message: e.to_string(),
        })?;

    crate::server::serve(listener, state).await
}
