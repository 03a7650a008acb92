use super::{Config, ConfigError};
use url::Url;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Measurement directory must not be empty".to_string(),
            ));
        }

        let endpoint = Url::parse(&self.endpoint).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid endpoint URL '{}': {}", self.endpoint, e))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "Endpoint '{}' must use http or https",
                self.endpoint
            )));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "Request timeout must be greater than 0 (unset it to wait indefinitely)"
                    .to_string(),
            ));
        }

        Ok(())
    }
}
