use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Cannot list measurement directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read measurement file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No quoted measurement found in {}", path.display())]
    NoMeasurement { path: PathBuf },

    #[error("Regex compilation failed for pattern '{pattern}': {source}")]
    Pattern {
        pattern: &'static str,
        #[source]
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_measurement_names_file() {
        let error = ReaderError::NoMeasurement {
            path: PathBuf::from("/data/2020-01.txt"),
        };

        assert_eq!(
            error.to_string(),
            "No quoted measurement found in /data/2020-01.txt"
        );
    }

    #[test]
    fn test_pattern_error_names_pattern() {
        let source = regex::Regex::new("[invalid regex pattern").unwrap_err();
        let error = ReaderError::Pattern {
            pattern: "[invalid regex pattern",
            source,
        };

        assert!(error.to_string().contains("[invalid regex pattern"));
    }
}
