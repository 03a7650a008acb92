pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, DEFAULT_ENDPOINT, LogLevel};
pub use logging::{LoggingError, setup_logging};

use crate::VERSION;
use crate::replay::{ReplaySummary, replay_directory};
use crate::sender::EnclaveClient;
use anyhow::Context;
use std::process::ExitCode;
use tracing::{error, info};

pub struct App {
    config: Config,
    client: EnclaveClient,
}

impl App {
    pub fn from_config(config: Config) -> Result<Self, anyhow::Error> {
        let client = EnclaveClient::new(config.client_config())
            .context("Failed to create enclave client")?;

        Ok(Self { config, client })
    }

    pub async fn run(&self) -> Result<ReplaySummary, anyhow::Error> {
        info!("Starting p3a-replay v{}", VERSION);
        info!(
            "Configuration: directory={}, endpoint={}, response_policy={:?}",
            self.config.directory.display(),
            self.client.endpoint(),
            self.config.response_policy
        );
        if self.config.accept_invalid_certs {
            info!("TLS certificate verification is disabled");
        }

        let summary = replay_directory(
            &self.config.directory,
            &self.client,
            self.config.response_policy,
        )
        .await
        .with_context(|| format!("Replay of {} failed", self.config.directory.display()))?;

        Ok(summary)
    }
}

/// Binary entry point: usage errors exit 1 with the usage line, runtime
/// errors are logged and exit 1.
pub async fn main() -> ExitCode {
    let config = match Config::from_args_and_env(std::env::args_os()) {
        Ok(config) => config,
        Err(e @ ConfigError::Usage { .. }) => {
            eprintln!("{e}");
            return ExitCode::from(1);
        }
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let logging_ready = match setup_logging(config.log_level) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Warning: {e}");
            false
        }
    };

    let result = match App::from_config(config) {
        Ok(app) => app.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if logging_ready => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
