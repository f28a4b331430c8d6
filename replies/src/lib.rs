//! Structured payload extraction for assistant replies.
//!
//! The model answers in free-form Markdown and may embed one fenced
//! ```` ```json ```` block carrying a machinery recommendation and/or a field
//! operation schedule. This crate pulls that block out of the display text and
//! exposes both the verbatim JSON and lenient typed views of it.

mod extract;
mod payload;

pub use extract::{Extraction, FENCE, JSON_TAG, extract};
pub use payload::{MachineType, MachinerySpec, ScheduleTask, TaskStatus};
