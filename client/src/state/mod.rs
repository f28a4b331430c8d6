//! Client-side state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each struct lives in an `RwSignal` provided by `App`. The types are plain
//! data with methods, so the rules they carry are tested natively without a
//! browser.

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod sessions;
pub mod ui;
