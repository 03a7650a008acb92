pub mod client;

pub use client::{
    ClientConfig, ClientError, DEFAULT_ENDPOINT, Delivery, EnclaveClient, MeasurementSink,
};
