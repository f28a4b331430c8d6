//! Typed views of the structured payloads a reply may carry.
//!
//! Conversion is lenient on purpose of display: numbers are accepted where
//! text is expected, missing fields become empty, and unrecognised enum labels
//! are kept in an `Other` variant rather than dropped.

#[cfg(test)]
#[path = "payload_test.rs"]
mod payload_test;

use serde_json::{Map, Value};

/// Category of a recommended machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MachineType {
    Tractor,
    Harvester,
    Seeder,
    /// Any label the model produced that is not one of the known categories.
    Other(String),
}

impl MachineType {
    /// Parse a model-supplied label, accepting English (any case) or Chinese names.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "tractor" | "拖拉机" => Self::Tractor,
            "harvester" | "收割机" => Self::Harvester,
            "seeder" | "播种机" => Self::Seeder,
            _ => Self::Other(trimmed.to_owned()),
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Tractor => "Tractor",
            Self::Harvester => "Harvester",
            Self::Seeder => "Seeder",
            Self::Other(label) => label,
        }
    }
}

/// Machinery recommendation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachinerySpec {
    pub kind: MachineType,
    pub brand: String,
    pub model: String,
    pub horsepower: String,
    pub width: String,
    pub suitable_for: String,
}

impl MachinerySpec {
    /// Build from the verbatim `machinery` value. `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            kind: MachineType::from_label(&text_field(object, "type")),
            brand: text_field(object, "brand"),
            model: text_field(object, "model"),
            horsepower: text_field(object, "horsepower"),
            width: text_field(object, "width"),
            suitable_for: text_field(object, "suitableFor"),
        })
    }
}

/// Progress of a scheduled field task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Other(String),
}

impl TaskStatus {
    /// Parse `Pending`, `InProgress`, `In Progress`, `in_progress`, `Completed`, etc.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "pending" | "" => Self::Pending,
            "inprogress" => Self::InProgress,
            "completed" | "done" => Self::Completed,
            _ => Self::Other(label.trim().to_owned()),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Other(label) => label,
        }
    }
}

/// One row of a field operation schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleTask {
    pub id: String,
    pub task_name: String,
    pub machine: String,
    /// Date string exactly as the model wrote it (normally `YYYY-MM-DD`).
    pub start_date: String,
    /// Whole days; 0 when the model omitted or garbled the value.
    pub duration_days: u32,
    pub status: TaskStatus,
}

impl ScheduleTask {
    /// Build one task from an object value. `None` for non-objects.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            id: text_field(object, "id"),
            task_name: text_field(object, "taskName"),
            machine: text_field(object, "machine"),
            start_date: text_field(object, "startDate"),
            duration_days: days_field(object, "durationDays"),
            status: TaskStatus::from_label(&text_field(object, "status")),
        })
    }

    /// Build a schedule from the verbatim `schedule` value. `None` unless it
    /// is an array; non-object entries are skipped.
    #[must_use]
    pub fn list_from_value(value: &Value) -> Option<Vec<Self>> {
        let items = value.as_array()?;
        Some(items.iter().filter_map(Self::from_value).collect())
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::Object(_) | Value::Null) | None => String::new(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn days_field(object: &Map<String, Value>, key: &str) -> u32 {
    let days = match object.get(key) {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => match text.trim().parse::<f64>() {
            Ok(days) => Some(days),
            Err(_) => None,
        },
        _ => None,
    };
    match days {
        Some(days) if days.is_finite() && days > 0.0 => days.round().min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}
