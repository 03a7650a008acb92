use std::fmt;
use std::path::{Path, PathBuf};

/// A single captured measurement ready for replay.
///
/// The value is opaque: it is whatever text sat between a pair of single
/// quotes in the source file, and it is forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    value: String,
    source: PathBuf,
}

impl Measurement {
    pub fn new(value: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            value: value.into(),
            source: source.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// File this measurement was extracted from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Request body sent to the enclave: the raw value wrapped in array
    /// brackets, no escaping applied.
    pub fn to_payload(&self) -> String {
        format!("[{}]", self.value)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
