//! # agri-client
//!
//! Leptos + WASM front-end for the agricultural-machinery assistant: a chat
//! UI backed by a hosted language model, a dashboard fed by sensor uploads
//! and structured replies, and per-user chat history in `localStorage`.
//!
//! The state types under [`state`] carry the session and turn rules and are
//! tested natively; browser APIs sit behind the `csr` feature.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
