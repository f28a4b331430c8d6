//! Comma/tab delimited text input (`.csv`, `.txt`, and anything not `.json`).
//!
//! Row shapes:
//! - one field: vibration; time synthesized from the row index
//! - two fields: time, vibration
//! - three or more: time, vibration, temperature (extra fields ignored)

#[cfg(test)]
#[path = "delimited_test.rs"]
mod delimited_test;

use crate::{ParseOptions, SensorDataPoint, parse_number};

pub(crate) fn parse(options: &ParseOptions, content: &str) -> Vec<SensorDataPoint> {
    let lines = non_blank_lines(content);
    let skip = usize::from(lines.first().is_some_and(|first| is_header(first)));

    lines
        .iter()
        .skip(skip)
        .enumerate()
        .map(|(index, line)| parse_row(options, index, line))
        .collect()
}

/// Split on `\r\n`, `\n` or `\r` and drop whitespace-only lines.
fn non_blank_lines(content: &str) -> Vec<&str> {
    content
        .split(['\n', '\r'])
        .filter(|line| !line.trim().is_empty())
        .collect()
}

fn strip_quotes(line: &str) -> String {
    line.chars().filter(|c| !matches!(c, '"' | '\'')).collect()
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split([',', '\t']).collect()
}

/// A line is a header when its first two fields are both non-numeric. A
/// missing second field counts as non-numeric.
fn is_header(line: &str) -> bool {
    let cleaned = strip_quotes(line);
    let fields = split_fields(&cleaned);
    let numeric = |idx: usize| fields.get(idx).is_some_and(|field| parse_number(field).is_some());
    !numeric(0) && !numeric(1)
}

fn parse_row(options: &ParseOptions, index: usize, line: &str) -> SensorDataPoint {
    let cleaned = strip_quotes(line);
    let fields = split_fields(&cleaned);
    let vibration = |field: &str| parse_number(field).unwrap_or(options.default_vibration);

    match fields.as_slice() {
        [only] => SensorDataPoint {
            time: options.synthetic_time(index),
            vibration: vibration(only),
            temperature: options.default_temperature,
        },
        [time, vib] => SensorDataPoint {
            time: time.trim().to_owned(),
            vibration: vibration(vib),
            temperature: options.default_temperature,
        },
        [time, vib, temp, ..] => SensorDataPoint {
            time: time.trim().to_owned(),
            vibration: vibration(vib),
            temperature: parse_number(temp).unwrap_or(options.default_temperature),
        },
        [] => SensorDataPoint {
            time: options.synthetic_time(index),
            vibration: options.default_vibration,
            temperature: options.default_temperature,
        },
    }
}
