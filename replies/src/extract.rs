//! Fenced JSON block scanning.
//!
//! DESIGN
//! ======
//! Only the first block whose info string is exactly [`JSON_TAG`] is consulted
//! and removed. Later blocks, including other JSON blocks, stay in the display
//! text untouched.
//!
//! ERROR HANDLING
//! ==============
//! A block that fails to parse never reaches the caller as an error. The raw
//! reply is returned as-is and the parser message is kept on
//! [`Extraction::json_error`].

#[cfg(test)]
#[path = "extract_test.rs"]
mod extract_test;

use serde_json::Value;

use crate::payload::{MachinerySpec, ScheduleTask};

/// Opening and closing fence marker.
pub const FENCE: &str = "```";

/// Info string that marks a fenced block as a structured payload. Matched
/// case-sensitively.
pub const JSON_TAG: &str = "json";

/// Result of scanning one reply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    /// Verbatim `machinery` value from the block, when present and non-null.
    pub machinery: Option<Value>,
    /// Verbatim `schedule` value from the block, when present and non-null.
    pub schedule: Option<Value>,
    /// Reply text with the consumed block removed and outer whitespace trimmed.
    pub clean_text: String,
    /// Parser message when a JSON block was found but could not be parsed.
    pub json_error: Option<String>,
}

impl Extraction {
    fn passthrough(raw: &str) -> Self {
        Self { clean_text: raw.to_owned(), ..Self::default() }
    }

    /// Whether either structured payload was found.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        self.machinery.is_some() || self.schedule.is_some()
    }

    /// Typed view of [`Self::machinery`]. `None` if absent or not an object.
    #[must_use]
    pub fn machinery_spec(&self) -> Option<MachinerySpec> {
        self.machinery.as_ref().and_then(MachinerySpec::from_value)
    }

    /// Typed view of [`Self::schedule`]. `None` if absent or not an array.
    #[must_use]
    pub fn schedule_tasks(&self) -> Option<Vec<ScheduleTask>> {
        self.schedule.as_ref().and_then(ScheduleTask::list_from_value)
    }
}

/// Byte span of a fenced block (fences included) and its inner body.
struct FencedBlock<'a> {
    start: usize,
    end: usize,
    body: &'a str,
}

fn find_json_block(raw: &str) -> Option<FencedBlock<'_>> {
    let mut cursor = 0;
    while let Some(offset) = raw[cursor..].find(FENCE) {
        let start = cursor + offset;
        let after_fence = start + FENCE.len();
        if let Some(info_rest) = raw[after_fence..].strip_prefix(JSON_TAG) {
            // The tag must be the whole info string: `json` but not `jsonc`.
            let line_len = info_rest.find('\n').unwrap_or(info_rest.len());
            if info_rest[..line_len].trim().is_empty() {
                let body_start = (after_fence + JSON_TAG.len() + line_len + 1).min(raw.len());
                let close = raw[body_start..].find(FENCE)?;
                return Some(FencedBlock {
                    start,
                    end: body_start + close + FENCE.len(),
                    body: &raw[body_start..body_start + close],
                });
            }
        }
        cursor = after_fence;
    }
    None
}

fn non_null(document: &Value, key: &str) -> Option<Value> {
    document.get(key).filter(|value| !value.is_null()).cloned()
}

/// Split a model reply into display text and structured payloads.
///
/// Replies without a JSON block come back unchanged with no payloads.
#[must_use]
pub fn extract(raw: &str) -> Extraction {
    let Some(block) = find_json_block(raw) else {
        return Extraction::passthrough(raw);
    };

    let document: Value = match serde_json::from_str(block.body) {
        Ok(document) => document,
        Err(err) => {
            log::warn!("reply json block could not be parsed: {err}");
            return Extraction { json_error: Some(err.to_string()), ..Extraction::passthrough(raw) };
        }
    };

    let mut clean = String::with_capacity(raw.len());
    clean.push_str(&raw[..block.start]);
    clean.push_str(&raw[block.end..]);

    Extraction {
        machinery: non_null(&document, "machinery"),
        schedule: non_null(&document, "schedule"),
        clean_text: clean.trim().to_owned(),
        json_error: None,
    }
}
