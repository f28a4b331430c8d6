//! Networking modules for the model-call collaborator.
//!
//! SYSTEM CONTEXT
//! ==============
//! `model` defines the collaborator seam and session handle, `gemini`
//! implements it over HTTP, and `config` holds the build-time endpoint
//! settings.

pub mod config;
pub mod gemini;
pub mod model;
