//! Per-user chat session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sessions live in memory as a list sorted by `last_modified` (newest first)
//! and are mirrored to one storage entry per user, key
//! `agri_chat_sessions_<user>`, holding the whole list as JSON. The store is
//! created at login and dropped at logout; the chat orchestrator is its only
//! writer.
//!
//! ERROR HANDLING
//! ==============
//! Absent or unreadable history loads as an empty list (logged, never
//! surfaced). Write failures from mutations are logged; the in-memory list
//! stays authoritative for the rest of the page lifetime.
//!
//! TRADE-OFFS
//! ==========
//! Every mutation rewrites the full list. Two tabs signed in as the same user
//! overwrite each other's writes.

#[cfg(test)]
#[path = "sessions_test.rs"]
mod sessions_test;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::clock::Clock;
use crate::util::storage::{KeyValueStore, StorageError, save_json};

pub const STORAGE_NAMESPACE: &str = "agri_chat_sessions";
pub const DEFAULT_SESSION_TITLE: &str = "新对话";
pub const TITLE_PREFIX_CHARS: usize = 15;
pub const TITLE_ELLIPSIS: &str = "...";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self { role: Role::User, text: text.into(), timestamp }
    }

    pub fn model(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self { role: Role::Model, text: text.into(), timestamp }
    }
}

/// What the assistant is focused on for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantMode {
    OperationsSelection,
    Scheduling,
    Diagnosis,
}

impl AssistantMode {
    pub const ALL: [Self; 3] = [Self::OperationsSelection, Self::Scheduling, Self::Diagnosis];

    pub fn label(self) -> &'static str {
        match self {
            Self::OperationsSelection => "作业选型",
            Self::Scheduling => "作业调度",
            Self::Diagnosis => "故障诊断",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::OperationsSelection => "根据地块、作物和农艺要求推荐合适的农机具",
            Self::Scheduling => "为多台农机编排作业顺序与时间计划",
            Self::Diagnosis => "结合传感器数据分析农机故障原因",
        }
    }

    /// First model message of a session opened in this mode.
    pub fn welcome_message(self) -> &'static str {
        match self {
            Self::OperationsSelection => {
                "您好！我是农机作业选型助手。请告诉我您的地块面积、作物类型和作业环节，我会为您推荐合适的机型与配置。"
            }
            Self::Scheduling => {
                "您好！我是农机作业调度助手。请告诉我需要完成的作业、可用机具和时间窗口，我会为您生成作业计划表。"
            }
            Self::Diagnosis => {
                "您好！我是农机故障诊断助手。请描述故障现象，也可以在右侧上传振动或温度传感器数据，我会帮您分析可能的原因。"
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<AssistantMode>,
    pub messages: Vec<ChatMessage>,
    pub last_modified: DateTime<Utc>,
}

impl ChatSession {
    /// Rewrite a placeholder title from the first user message once the
    /// transcript holds more than the opening message.
    fn retitle(&mut self) {
        if self.title != DEFAULT_SESSION_TITLE || self.messages.len() <= 1 {
            return;
        }
        if let Some(first) = self.messages.iter().find(|m| m.role == Role::User) {
            self.title = title_from_text(&first.text);
        }
    }
}

/// Storage key for `user`'s session list.
pub fn storage_key(user: &str) -> String {
    format!("{STORAGE_NAMESPACE}_{user}")
}

/// Session title derived from message text: whitespace collapsed, cut to
/// [`TITLE_PREFIX_CHARS`] characters plus [`TITLE_ELLIPSIS`] when longer.
pub fn title_from_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > TITLE_PREFIX_CHARS {
        let prefix: String = collapsed.chars().take(TITLE_PREFIX_CHARS).collect();
        format!("{prefix}{TITLE_ELLIPSIS}")
    } else {
        collapsed
    }
}

/// Result of [`SessionStore::update_session`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionUpdate {
    Updated,
    /// The id was unknown; the transcript was saved under this new id.
    Synthesized(String),
}

#[derive(Clone)]
pub struct SessionStore {
    user: String,
    sessions: Vec<ChatSession>,
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.user)
            .field("sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Read `user`'s history. Missing or corrupt data yields an empty store.
    pub fn load(user: &str, storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let key = storage_key(user);
        let mut sessions = match storage.get(&key) {
            None => {
                log::debug!("no stored sessions for {user}");
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<ChatSession>>(&raw) {
                Ok(sessions) => sessions,
                Err(e) => {
                    log::warn!("discarding unreadable session history for {user}: {e}");
                    Vec::new()
                }
            },
        };
        sort_by_recency(&mut sessions);
        Self { user: user.to_owned(), sessions, storage, clock }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Newest first.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn get(&self, id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Write the full list under the user's key.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`StorageError`].
    pub fn persist(&self) -> Result<(), StorageError> {
        save_json(self.storage.as_ref(), &storage_key(&self.user), &self.sessions)
    }

    /// Add a session holding `messages` at the head of the list.
    pub fn create_session(&mut self, mode: Option<AssistantMode>, messages: Vec<ChatMessage>) -> ChatSession {
        let now = self.clock.now();
        let mut session = ChatSession {
            id: self.allocate_id(now),
            title: DEFAULT_SESSION_TITLE.to_owned(),
            mode,
            messages,
            last_modified: now,
        };
        session.retitle();
        self.sessions.insert(0, session.clone());
        sort_by_recency(&mut self.sessions);
        self.persist_logged();
        session
    }

    /// Replace a session's transcript and bump its `last_modified`.
    ///
    /// An unknown `id` saves the transcript as a new session instead.
    pub fn update_session(&mut self, id: &str, messages: Vec<ChatMessage>) -> SessionUpdate {
        let now = self.clock.now();
        let outcome = if let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) {
            session.messages = messages;
            session.last_modified = now;
            session.retitle();
            SessionUpdate::Updated
        } else {
            log::warn!("update for unknown session {id}; saving transcript as a new session");
            let mut session = ChatSession {
                id: self.allocate_id(now),
                title: DEFAULT_SESSION_TITLE.to_owned(),
                mode: None,
                messages,
                last_modified: now,
            };
            session.retitle();
            let new_id = session.id.clone();
            self.sessions.push(session);
            SessionUpdate::Synthesized(new_id)
        };
        sort_by_recency(&mut self.sessions);
        self.persist_logged();
        outcome
    }

    /// Returns whether a session was removed.
    pub fn delete_session(&mut self, id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        let removed = self.sessions.len() != before;
        if removed {
            self.persist_logged();
        }
        removed
    }

    fn allocate_id(&self, now: DateTime<Utc>) -> String {
        let mut candidate = now.timestamp_millis();
        while self.contains(&candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn persist_logged(&self) {
        if let Err(e) = self.persist() {
            log::warn!("session history for {} not saved: {e}", self.user);
        }
    }
}

fn sort_by_recency(sessions: &mut [ChatSession]) {
    sessions.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
}
