use super::config::LogLevel;
use std::io::IsTerminal;
use std::sync::OnceLock;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Logging initialization failed: {details}")]
    InitFailed {
        details: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// HTTP stack crates are only interesting when something breaks.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls", "h2"];

pub fn build_filter_string(level: LogLevel) -> String {
    let mut filter_parts = Vec::with_capacity(QUIET_TARGETS.len() + 1);
    filter_parts.push(level.as_str().to_string());

    for target in QUIET_TARGETS {
        filter_parts.push(format!("{target}=warn"));
    }

    filter_parts.join(",")
}

/// Install the global subscriber. Later calls are no-ops.
pub fn setup_logging(level: LogLevel) -> Result<(), LoggingError> {
    static INITIALIZED: OnceLock<()> = OnceLock::new();

    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    let filter_string = build_filter_string(level);
    let env_filter = EnvFilter::try_new(&filter_string).map_err(|e| LoggingError::InitFailed {
        details: format!("Failed to create EnvFilter with '{filter_string}'"),
        source: Box::new(e),
    })?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_ansi(std::io::stderr().is_terminal())
                .compact(),
        )
        .try_init()
        .map_err(|e| LoggingError::InitFailed {
            details: "Failed to set global tracing subscriber".to_string(),
            source: Box::new(e),
        })?;

    let _ = INITIALIZED.set(());
    Ok(())
}
