//! JSON array input: one object per sample.

use serde_json::{Map, Value};

use crate::{ParseError, ParseOptions, SensorDataPoint, parse_number};

const VIBRATION_KEYS: [&str; 3] = ["vibration", "value", "v"];
const TEMPERATURE_KEYS: [&str; 2] = ["temperature", "temp"];

pub(crate) fn parse(options: &ParseOptions, content: &str) -> Result<Vec<SensorDataPoint>, ParseError> {
    let root: Value = serde_json::from_str(content).map_err(|err| ParseError::InvalidJson(err.to_string()))?;
    let Value::Array(items) = root else {
        return Err(ParseError::RootNotArray);
    };

    let empty = Map::new();
    Ok(items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let fields = item.as_object().unwrap_or(&empty);
            SensorDataPoint {
                time: time_label(fields).unwrap_or_else(|| options.synthetic_time(index)),
                vibration: first_number(fields, &VIBRATION_KEYS).unwrap_or(options.default_vibration),
                temperature: first_number(fields, &TEMPERATURE_KEYS).unwrap_or(options.default_temperature),
            }
        })
        .collect())
}

fn time_label(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("time")? {
        Value::String(label) => Some(label.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Value of the first non-null key, converted to a number. A present but
/// non-numeric value yields `None` so the caller's default applies.
fn first_number(fields: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    let value = keys.iter().find_map(|key| fields.get(*key).filter(|v| !v.is_null()))?;
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_number(text),
        _ => None,
    }
}
