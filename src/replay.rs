use crate::reader::{MeasurementReader, ReaderError};
use crate::sender::{ClientError, MeasurementSink};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error(transparent)]
    Reader(#[from] ReaderError),

    #[error("Failed to deliver measurement from {}: {source}", path.display())]
    Send {
        path: PathBuf,
        #[source]
        source: ClientError,
    },

    #[error("Enclave rejected measurement from {} with HTTP {status}", path.display())]
    Rejected { path: PathBuf, status: u16 },
}

/// What the replay does when the enclave answers with a non-2xx status.
/// Transport failures always abort, regardless of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePolicy {
    /// Log a warning, count the rejection and keep going.
    #[default]
    Tolerate,
    /// Stop at the first rejected measurement.
    Abort,
}

impl FromStr for ResponsePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tolerate" => Ok(ResponsePolicy::Tolerate),
            "abort" => Ok(ResponsePolicy::Abort),
            _ => Err(format!("unknown response policy '{s}' (valid: tolerate, abort)")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub files_opened: usize,
    pub sent: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub elapsed: Duration,
}

/// Drains a [`MeasurementReader`] into a sink, one request at a time.
#[derive(Debug, Clone)]
pub struct Replayer<S> {
    sink: S,
    policy: ResponsePolicy,
}

impl<S: MeasurementSink> Replayer<S> {
    pub fn new(sink: S, policy: ResponsePolicy) -> Self {
        Self { sink, policy }
    }

    pub async fn run(&self, mut reader: MeasurementReader) -> Result<ReplaySummary, ReplayError> {
        let start = Instant::now();
        let mut summary = ReplaySummary::default();

        info!(
            directory = %reader.directory().display(),
            files = reader.remaining_files(),
            "Replaying measurement files"
        );

        for item in reader.by_ref() {
            let measurement = item?;

            let delivery = self
                .sink
                .send(&measurement)
                .await
                .map_err(|source| {
                    debug!(
                        file = %measurement.source().display(),
                        timeout = source.is_timeout(),
                        "Delivery failed"
                    );
                    ReplayError::Send {
                        path: measurement.source().to_path_buf(),
                        source,
                    }
                })?;
            summary.sent += 1;

            if delivery.is_success() {
                summary.accepted += 1;
                continue;
            }

            summary.rejected += 1;
            warn!(
                file = %measurement.source().display(),
                status = delivery.status.as_u16(),
                "Enclave rejected measurement"
            );

            if self.policy == ResponsePolicy::Abort {
                return Err(ReplayError::Rejected {
                    path: measurement.source().to_path_buf(),
                    status: delivery.status.as_u16(),
                });
            }
        }

        summary.files_opened = reader.files_opened();
        summary.elapsed = start.elapsed();

        info!(
            files = summary.files_opened,
            sent = summary.sent,
            accepted = summary.accepted,
            rejected = summary.rejected,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Replay finished"
        );

        Ok(summary)
    }
}

/// Replay every measurement under `directory` to `sink`.
pub async fn replay_directory<S: MeasurementSink>(
    directory: impl AsRef<Path>,
    sink: S,
    policy: ResponsePolicy,
) -> Result<ReplaySummary, ReplayError> {
    let reader = MeasurementReader::open(directory)?;
    Replayer::new(sink, policy).run(reader).await
}
