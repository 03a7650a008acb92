// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. ReaderError in reader module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown             // Internal API
)]

pub mod app;
pub mod domain;
pub mod reader;
pub mod replay;
pub mod sender;

// Re-export main types for easy access
pub use app::{App, Config};
pub use domain::Measurement;
pub use reader::{MeasurementReader, ReaderError};
pub use replay::{ReplayError, ReplaySummary, Replayer, ResponsePolicy, replay_directory};
pub use sender::{ClientConfig, ClientError, Delivery, EnclaveClient, MeasurementSink};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
