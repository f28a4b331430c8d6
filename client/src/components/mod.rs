//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the workspace surfaces while reading/writing shared
//! state from Leptos context providers.

pub mod chat_panel;
pub mod dashboard_panel;
pub mod mode_picker;
pub mod sensor_chart;
pub mod session_sidebar;
pub mod upload_zone;
