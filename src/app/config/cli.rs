use super::env_helpers::{load_env_string, load_env_var, load_env_var_opt};
use super::{ConfigError, LogLevel};
use crate::replay::ResponsePolicy;
use crate::sender::{ClientConfig, DEFAULT_ENDPOINT};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// The measurement directory is the only command-line input. Everything else
/// comes from the environment, optionally seeded by an inline TOML document
/// in `REPLAY_CONFIG`.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(
    name = "p3a-replay",
    about = "Replay captured P3A measurements to an enclave endpoint",
    disable_help_flag = true,
    disable_version_flag = true
)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding captured measurement files
    #[arg(value_name = "DIRECTORY", allow_hyphen_values = true)]
    #[serde(skip)]
    pub directory: PathBuf,

    /// Enclave endpoint receiving the replayed measurements
    #[arg(skip = DEFAULT_ENDPOINT.to_string())]
    pub endpoint: String,

    /// Disable TLS certificate verification (self-signed enclave certificates)
    #[arg(skip)]
    pub accept_invalid_certs: bool,

    /// Per-request timeout; unset means wait forever
    #[arg(skip)]
    pub request_timeout_secs: Option<u64>,

    /// Handling of non-2xx responses
    #[arg(skip)]
    pub response_policy: ResponsePolicy,

    #[arg(skip)]
    pub log_level: LogLevel,

    /// Derived fields (not configuration inputs)
    #[serde(skip)]
    #[arg(skip)]
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            accept_invalid_certs: false,
            request_timeout_secs: None,
            response_policy: ResponsePolicy::Tolerate,
            log_level: LogLevel::Info,
            request_timeout: None,
        }
    }
}

impl Config {
    /// Parse the command line (program name plus exactly one directory) and
    /// layer the environment on top.
    pub fn from_args_and_env<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let program = args
            .first()
            .map(|program| program.to_string_lossy().into_owned())
            .unwrap_or_else(|| "p3a-replay".to_string());

        let cli = Config::try_parse_from(&args).map_err(|_| ConfigError::Usage { program })?;

        let mut config = Self::from_env()?;
        config.directory = cli.directory;
        config.post_process();
        config.validate()?;
        Ok(config)
    }

    /// Everything but the directory, read from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = if let Ok(replay_config) = std::env::var("REPLAY_CONFIG") {
            Self::from_replay_config_env(&replay_config)?
        } else {
            Config::default()
        };

        load_env_string("ENCLAVE_ENDPOINT", &mut config.endpoint);
        load_env_var("ACCEPT_INVALID_CERTS", &mut config.accept_invalid_certs)?;
        load_env_var_opt("REQUEST_TIMEOUT_SECS", &mut config.request_timeout_secs)?;
        load_env_var("RESPONSE_POLICY", &mut config.response_policy)?;
        load_env_var("LOG_LEVEL", &mut config.log_level)?;

        config.post_process();
        Ok(config)
    }

    pub fn from_replay_config_env(replay_config: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(replay_config)?;
        config.post_process();
        Ok(config)
    }

    pub fn post_process(&mut self) {
        self.request_timeout = self.request_timeout_secs.map(Duration::from_secs);
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.endpoint.clone(),
            accept_invalid_certs: self.accept_invalid_certs,
            timeout: self.request_timeout,
        }
    }
}
