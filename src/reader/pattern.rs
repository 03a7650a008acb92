// Quoted measurement extraction
use super::error::ReaderError;
use regex::Regex;
use std::sync::OnceLock;

/// A measurement is any non-empty run of characters between single quotes.
pub const MEASUREMENT_PATTERN: &str = r"'([^']+)'";

static MEASUREMENT_REGEX: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn measurement_regex() -> Result<&'static Regex, ReaderError> {
    match MEASUREMENT_REGEX.get_or_init(|| Regex::new(MEASUREMENT_PATTERN)) {
        Ok(regex) => Ok(regex),
        Err(e) => Err(ReaderError::Pattern {
            pattern: MEASUREMENT_PATTERN,
            source: e.clone(),
        }),
    }
}

/// Extract every quoted value from `content`.
///
/// Each line is scanned on its own, so a value never spans a line break.
/// Values come out top to bottom, then left to right within a line.
pub fn extract_measurements(content: &str) -> Result<Vec<String>, ReaderError> {
    let regex = measurement_regex()?;

    Ok(content
        .lines()
        .flat_map(|line| regex.captures_iter(line))
        .filter_map(|captures| captures.get(1))
        .map(|value| value.as_str().to_string())
        .collect())
}
