use crate::domain::Measurement;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Enclave `/reports` route used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://localhost:8080/reports";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl ClientError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::NetworkError(e) if e.is_timeout())
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    /// Skip certificate verification, for enclaves serving self-signed certificates.
    pub accept_invalid_certs: bool,
    /// `None` waits on the enclave indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            accept_invalid_certs: false,
            timeout: None,
        }
    }
}

/// Outcome of one delivered request. Any status counts as delivered; what
/// to do with a non-2xx status is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub status: StatusCode,
    pub latency: Duration,
}

impl Delivery {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Destination for replayed measurements.
pub trait MeasurementSink {
    fn send(
        &self,
        measurement: &Measurement,
    ) -> impl Future<Output = Result<Delivery, ClientError>>;
}

impl<S: MeasurementSink + ?Sized> MeasurementSink for &S {
    fn send(
        &self,
        measurement: &Measurement,
    ) -> impl Future<Output = Result<Delivery, ClientError>> {
        (**self).send(measurement)
    }
}

#[derive(Debug, Clone)]
pub struct EnclaveClient {
    client: Client,
    config: ClientConfig,
    endpoint_url: Url,
}

impl EnclaveClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let endpoint_url: Url = config
            .endpoint
            .parse()
            .map_err(|e| ClientError::InvalidConfiguration(format!("Invalid endpoint URL: {e}")))?;

        if !matches!(endpoint_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidConfiguration(format!(
                "Unsupported endpoint scheme: {}",
                endpoint_url.scheme()
            )));
        }

        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        if config.accept_invalid_certs {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            ClientError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            config,
            endpoint_url,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// POST one measurement as `[<value>]`. Only transport failures are
    /// errors; the response status is reported back untouched.
    pub async fn post_measurement(&self, measurement: &Measurement) -> Result<Delivery, ClientError> {
        let start = Instant::now();

        let response = self
            .client
            .post(self.endpoint_url.clone())
            .body(measurement.to_payload())
            .send()
            .await?;

        let delivery = Delivery {
            status: response.status(),
            latency: start.elapsed(),
        };

        debug!(
            file = %measurement.source().display(),
            status = delivery.status.as_u16(),
            latency_ms = delivery.latency.as_millis() as u64,
            "Posted measurement"
        );

        Ok(delivery)
    }
}

impl MeasurementSink for EnclaveClient {
    async fn send(&self, measurement: &Measurement) -> Result<Delivery, ClientError> {
        self.post_measurement(measurement).await
    }
}
