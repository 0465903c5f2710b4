//! Record splitting and lenient numeric parsing.
//!
//! Scheduler output is treated as one record per line with comma-separated
//! fields. A line without a delimiter is header/footer noise and never a
//! record. Numeric fields that fail to parse read as zero.

/// Delimiter between fields of a record.
pub const FIELD_DELIMITER: char = ',';

/// Iterate the lines of `text` that qualify as records.
///
/// A record is any line containing at least one [`FIELD_DELIMITER`].
pub fn record_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| line.contains(FIELD_DELIMITER))
}

/// Split a record into whitespace-trimmed fields.
///
/// Returns None when the line holds no delimiter.
pub fn split_record(line: &str) -> Option<Vec<&str>> {
    if !line.contains(FIELD_DELIMITER) {
        return None;
    }
    Some(line.split(FIELD_DELIMITER).map(str::trim).collect())
}

/// Parse a numeric field, reading anything unparsable as `0.0`.
///
/// Truncated or garbled scheduler output must not abort a scrape, so this
/// never fails.
pub fn parse_lenient(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(0.0)
}
