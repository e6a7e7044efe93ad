// ABOUTME: Parsing of operator input for multi-step prompts
// ABOUTME: Checks day-of-month range, mark values and export file extensions

/// Extension accepted for exported journals
pub const EXPORT_EXTENSION: &str = ".xlsx";

/// Why a day-of-month answer was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayError {
    /// Not an integer at all
    NotANumber,
    /// An integer outside 1..=31
    OutOfRange,
}

/// Parse a day-of-month in 1..=31
pub fn parse_day(text: &str) -> Result<u32, DayError> {
    let value: i64 = text.trim().parse().map_err(|_| DayError::NotANumber)?;
    if (1..=31).contains(&value) {
        // In range, so the cast is lossless.
        Ok(value as u32)
    } else {
        Err(DayError::OutOfRange)
    }
}

/// Parse a mark; only finite numbers are accepted
pub fn parse_mark(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|mark| mark.is_finite())
}

/// Whether a filename has the accepted export extension
pub fn is_export_filename(filename: &str) -> bool {
    filename.ends_with(EXPORT_EXTENSION)
}
