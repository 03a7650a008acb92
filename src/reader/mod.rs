pub mod error;
pub mod pattern;

pub use error::ReaderError;
pub use pattern::{MEASUREMENT_PATTERN, extract_measurements};

use crate::domain::Measurement;
use std::collections::VecDeque;
use std::fs;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lazy, single-pass iterator over the measurements stored in a directory.
///
/// Files are visited by descending filename. A file is read only once the
/// measurements of the previous file are used up, and every measurement of a
/// file is yielded before the next file is opened.
#[derive(Debug)]
pub struct MeasurementReader {
    directory: PathBuf,
    // Sorted ascending, consumed from the back.
    pending_files: Vec<PathBuf>,
    buffered: VecDeque<Measurement>,
    files_opened: usize,
}

impl MeasurementReader {
    pub fn open(directory: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let directory = directory.as_ref().to_path_buf();
        let directory_error = |source: std::io::Error| ReaderError::Directory {
            path: directory.clone(),
            source,
        };

        let mut pending_files = Vec::new();
        for entry in fs::read_dir(&directory).map_err(directory_error)? {
            let path = entry.map_err(directory_error)?.path();
            if path.is_file() {
                pending_files.push(path);
            }
        }
        pending_files.sort();

        debug!(
            directory = %directory.display(),
            files = pending_files.len(),
            "Listed measurement files"
        );

        Ok(Self {
            directory,
            pending_files,
            buffered: VecDeque::new(),
            files_opened: 0,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Files not yet opened.
    pub fn remaining_files(&self) -> usize {
        self.pending_files.len()
    }

    pub fn files_opened(&self) -> usize {
        self.files_opened
    }

    fn read_next_file(&mut self, path: PathBuf) -> Result<Measurement, ReaderError> {
        self.files_opened += 1;

        let content = fs::read_to_string(&path).map_err(|source| ReaderError::File {
            path: path.clone(),
            source,
        })?;

        let mut values = extract_measurements(&content)?.into_iter();
        let Some(first) = values.next() else {
            return Err(ReaderError::NoMeasurement { path });
        };
        self.buffered
            .extend(values.map(|value| Measurement::new(value, &path)));

        debug!(
            file = %path.display(),
            measurements = self.buffered.len() + 1,
            "Read measurement file"
        );

        Ok(Measurement::new(first, path))
    }
}

impl Iterator for MeasurementReader {
    type Item = Result<Measurement, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(measurement) = self.buffered.pop_front() {
            return Some(Ok(measurement));
        }

        let path = self.pending_files.pop()?;
        Some(self.read_next_file(path))
    }
}

impl FusedIterator for MeasurementReader {}
