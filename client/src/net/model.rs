//! Model-call collaborator seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chat orchestrator talks to the language model only through
//! [`ChatModel`]. Conversational memory is not hidden inside the client: it is
//! an explicit [`ChatHandle`] returned by `initialize_chat` or
//! `restore_chat_session` and threaded through every `send_message`.
//!
//! DESIGN
//! ======
//! `send_message` extends the handle's history only after a successful reply,
//! so a failed turn can be retried without duplicating it.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use async_trait::async_trait;

use crate::state::sessions::{ChatMessage, Role};

/// Fixed instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "你是一名资深的农业机械专家助手，服务于农场主和农机手。\
请用简体中文回答，条理清晰，适当使用 Markdown 表格；需要展示流程时可以使用 mermaid 代码块。\
当推荐具体农机时，请在回答末尾附上一个 ```json 代码块，包含 \"machinery\" 字段：\
{\"type\": \"Tractor|Harvester|Seeder\", \"brand\", \"model\", \"horsepower\", \"width\", \"suitableFor\"}。\
当生成作业计划时，请在回答末尾附上一个 ```json 代码块，包含 \"schedule\" 数组，每项为 \
{\"id\", \"taskName\", \"machine\", \"startDate\": \"YYYY-MM-DD\", \"durationDays\", \"status\": \"Pending|In Progress|Completed\"}。\
每个回答最多只附带一个 json 代码块。";

/// Errors produced by model calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// No API key was configured when the bundle was built.
    #[error("missing API key: GEMINI_API_KEY was not set at build time")]
    MissingApiKey,

    /// The HTTP request could not be sent or its body could not be read.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The endpoint returned a non-success HTTP status.
    #[error("API response error: status {status}: {body}")]
    ApiResponse { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The response carried no text (blocked or empty candidate).
    #[error("model returned no text")]
    EmptyReply,

    /// Network calls are only available in the browser build.
    #[error("model calls are unavailable outside the browser")]
    Unavailable,
}

impl ModelError {
    pub fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

/// One replayable turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// Per-session conversational memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatHandle {
    pub system_instruction: String,
    pub history: Vec<Turn>,
}

impl ChatHandle {
    pub fn new(system_instruction: &str) -> Self {
        Self { system_instruction: system_instruction.to_owned(), history: Vec::new() }
    }

    /// Replay a transcript. Model messages before the first user message
    /// (welcome greetings) are skipped so the history opens on a user turn.
    pub fn restored(system_instruction: &str, transcript: &[ChatMessage]) -> Self {
        let history = transcript
            .iter()
            .skip_while(|m| m.role == Role::Model)
            .map(|m| Turn { role: m.role, text: m.text.clone() })
            .collect();
        Self { system_instruction: system_instruction.to_owned(), history }
    }

    /// Record a completed exchange.
    pub fn record_exchange(&mut self, user_text: &str, reply: &str) {
        self.history.push(Turn { role: Role::User, text: user_text.to_owned() });
        self.history.push(Turn { role: Role::Model, text: reply.to_owned() });
    }
}

/// Request/response language model with explicit session handles.
#[async_trait(?Send)]
pub trait ChatModel {
    fn system_instruction(&self) -> &str {
        SYSTEM_INSTRUCTION
    }

    /// Fresh conversational context.
    fn initialize_chat(&self) -> ChatHandle {
        ChatHandle::new(self.system_instruction())
    }

    /// Context resumed from a stored transcript.
    fn restore_chat_session(&self, history: &[ChatMessage]) -> ChatHandle {
        ChatHandle::restored(self.system_instruction(), history)
    }

    /// One request/response turn. On success the exchange is appended to
    /// `handle`; on failure `handle` is untouched.
    async fn send_message(&self, handle: &mut ChatHandle, text: &str) -> Result<String, ModelError>;
}
