//! `queue-probe` entry point.

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::{error, warn};

use queue_probe::logging::setup_logging;
use queue_probe::login::fetch_token;
use queue_probe::signals::shutdown_signal;
use queue_probe::{CliArgs, ProbeConfig, ProbeError, ProbeSession};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Configuration comes first so logging can honour it
    let mut config = ProbeConfig::load_from_file(&args.config).await?;
    config.apply_cli(&args);
    config
        .validate()
        .map_err(|e| anyhow!("Configuration validation failed: {e}"))?;

    setup_logging(&config.logging)?;

    let server = config.server_url()?;
    let token = match &config.auth.login {
        Some(login) => match fetch_token(&server, login).await {
            Ok(token) => token,
            Err(ProbeError::LoginRejected { status, body }) => {
                error!("❌ Failed to login ({status}): {body}");
                return Ok(());
            }
            Err(e) => {
                error!("❌ Failed to login: {e}");
                return Ok(());
            }
        },
        None => config.auth.token.clone(),
    };

    let session = ProbeSession::new(&config, token)?;
    session
        .run_until(async {
            if let Err(e) = shutdown_signal().await {
                warn!("Signal handling unavailable: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}
