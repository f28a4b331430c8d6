//! Sensor export ingestion for the machinery dashboard.
//!
//! Turns an uploaded file (JSON array or comma/tab delimited text) into a
//! sequence of [`SensorDataPoint`]s. Ingestion is best-effort: a malformed
//! field is replaced by a configured default instead of rejecting the row,
//! and only structurally unusable input fails.

mod delimited;
mod json;

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;

use serde::{Deserialize, Serialize};

/// File extensions accepted by the upload surface.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "json", "txt"];

/// One normalized sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorDataPoint {
    /// Time label as found in the source, or `"{n}ms"` when synthesized.
    pub time: String,
    /// Vibration amplitude; expected to be non-negative.
    pub vibration: f64,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
}

/// Error returned when a file yields no usable rows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The `.json` file is not valid JSON.
    #[error("invalid json: {0}")]
    InvalidJson(String),
    /// The `.json` file parsed but its root is not an array.
    #[error("root must be an array")]
    RootNotArray,
    /// Parsing finished with an empty sequence.
    #[error("no rows produced")]
    NoRows,
}

/// Defaults substituted for missing or unparseable values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParseOptions {
    pub default_vibration: f64,
    pub default_temperature: f64,
    /// Spacing used when synthesizing time labels from the row index.
    pub time_step_ms: u64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { default_vibration: 0.0, default_temperature: 60.0, time_step_ms: 10 }
    }
}

impl ParseOptions {
    fn synthetic_time(&self, index: usize) -> String {
        format!("{}ms", index as u64 * self.time_step_ms)
    }
}

/// Parsing route chosen from the file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Delimited,
}

fn extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

/// `.json` (any case) parses as JSON; everything else as delimited text.
#[must_use]
pub fn detect_format(file_name: &str) -> SourceFormat {
    match extension(file_name).as_deref() {
        Some("json") => SourceFormat::Json,
        _ => SourceFormat::Delimited,
    }
}

/// Whether the upload surface accepts this file name.
#[must_use]
pub fn is_supported_upload(file_name: &str) -> bool {
    extension(file_name).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Parse with [`ParseOptions::default`].
///
/// # Errors
///
/// See [`parse_with`].
pub fn parse(file_name: &str, content: &str) -> Result<Vec<SensorDataPoint>, ParseError> {
    parse_with(&ParseOptions::default(), file_name, content)
}

/// Parse `content`, dispatching on the extension of `file_name`.
///
/// # Errors
///
/// [`ParseError::InvalidJson`] / [`ParseError::RootNotArray`] for unusable
/// JSON input, [`ParseError::NoRows`] when nothing was produced.
pub fn parse_with(
    options: &ParseOptions,
    file_name: &str,
    content: &str,
) -> Result<Vec<SensorDataPoint>, ParseError> {
    let points = match detect_format(file_name) {
        SourceFormat::Json => json::parse(options, content)?,
        SourceFormat::Delimited => delimited::parse(options, content),
    };
    if points.is_empty() {
        return Err(ParseError::NoRows);
    }
    Ok(points)
}

/// Finite number from a text field, `None` otherwise.
fn parse_number(field: &str) -> Option<f64> {
    match field.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}
