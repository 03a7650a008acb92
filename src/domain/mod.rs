//! Domain layer for p3a-replay.
//!
//! Contains the canonical type shared across all modules:
//! - `Measurement`: one captured P3A data point, as extracted from disk

pub mod measurement;

pub use measurement::Measurement;
