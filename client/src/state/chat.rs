//! Chat orchestrator for the active session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the visible transcript, the active session id, and the model
//! collaborator's [`ChatHandle`]. Every transcript change is written through
//! the [`SessionStore`]. Lives in an `RwSignal` provided by `App`.
//!
//! DESIGN
//! ======
//! A turn is split so no signal borrow is held across the network await:
//! [`ChatState::begin_turn`] appends the user message and hands back a
//! [`PendingTurn`] tagged with its session id; the caller awaits the model;
//! [`ChatState::complete_turn`] merges the reply. A reply whose session is no
//! longer active is saved to that session in the store and leaves the visible
//! transcript alone.
//!
//! At most one turn is in flight. `begin_turn` refuses while one is pending.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::sync::Arc;

use replies::Extraction;

use super::sessions::{AssistantMode, ChatMessage, ChatSession, SessionStore, SessionUpdate};
use crate::net::model::{ChatHandle, ChatModel, ModelError};
use crate::util::clock::Clock;
use crate::util::storage::KeyValueStore;

/// Shown in place of a reply when the model call fails.
pub const MODEL_ERROR_TEXT: &str = "抱歉，智能助手暂时无法响应，请检查网络连接或稍后再试。";

/// Shown instead of [`MODEL_ERROR_TEXT`] when the failure is transient.
pub const MODEL_BUSY_TEXT: &str = "抱歉，智能助手服务繁忙，请稍后重试。";

/// Shown when a reply consisted only of a structured block.
pub const STRUCTURED_ONLY_TEXT: &str = "已生成结构化结果，请在右侧面板查看。";

/// Opening message of a session started without a mode.
pub const GENERAL_WELCOME: &str = "您好！我是农机智能助手，可以帮您进行农机选型、作业调度和故障诊断。请问有什么可以帮您？";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatPhase {
    SignedOut,
    /// Signed in, no session open (mode picker).
    Idle,
    Active,
    WaitingForReply,
}

/// A user turn awaiting its reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingTurn {
    /// Matches `ChatState::in_flight` while this turn is the one awaited.
    pub turn: u64,
    /// Sign-in generation the turn was started under.
    pub epoch: u64,
    pub session_id: String,
    pub text: String,
    pub handle: ChatHandle,
}

/// How [`ChatState::complete_turn`] applied a reply.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnOutcome {
    pub session_id: String,
    /// False when the user had switched away, or the session was deleted.
    pub applied_to_active: bool,
    pub failed: bool,
    /// Present for successful replies to the active session.
    pub extraction: Option<Extraction>,
}

#[derive(Clone, Debug, Default)]
pub struct ChatState {
    store: Option<SessionStore>,
    active_id: Option<String>,
    messages: Vec<ChatMessage>,
    mode: Option<AssistantMode>,
    handle: Option<ChatHandle>,
    in_flight: Option<(u64, String)>,
    // Survive sign-in/sign-out so a late reply can't match a newer turn.
    last_turn: u64,
    epoch: u64,
}

impl ChatState {
    /// Load `user`'s history and start at the mode picker.
    pub fn sign_in(&mut self, user: &str, storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) {
        *self = Self {
            store: Some(SessionStore::load(user, storage, clock)),
            last_turn: self.last_turn,
            epoch: self.epoch + 1,
            ..Self::default()
        };
    }

    /// Drop all in-memory session state. Stored history is kept.
    pub fn sign_out(&mut self) {
        *self = Self { last_turn: self.last_turn, epoch: self.epoch + 1, ..Self::default() };
    }

    pub fn user(&self) -> Option<&str> {
        self.store.as_ref().map(SessionStore::user)
    }

    pub fn phase(&self) -> ChatPhase {
        match (&self.store, &self.active_id, &self.in_flight) {
            (None, _, _) => ChatPhase::SignedOut,
            (Some(_), None, _) => ChatPhase::Idle,
            (Some(_), Some(_), Some(_)) => ChatPhase::WaitingForReply,
            (Some(_), Some(_), None) => ChatPhase::Active,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn sessions(&self) -> &[ChatSession] {
        match &self.store {
            Some(store) => store.sessions(),
            None => &[],
        }
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn mode(&self) -> Option<AssistantMode> {
        self.mode
    }

    /// Open a new session seeded with the mode's welcome message.
    ///
    /// Returns the new id, or `None` when signed out.
    pub fn start_session(&mut self, model: &dyn ChatModel, mode: Option<AssistantMode>) -> Option<String> {
        let store = self.store.as_mut()?;
        let welcome = mode.map_or(GENERAL_WELCOME, AssistantMode::welcome_message);
        let session = store.create_session(mode, vec![ChatMessage::model(welcome, store.now())]);
        self.active_id = Some(session.id.clone());
        self.messages = session.messages;
        self.mode = mode;
        self.handle = Some(model.initialize_chat());
        Some(session.id)
    }

    /// Make a stored session active and resync the model's memory to it.
    pub fn select_session(&mut self, model: &dyn ChatModel, id: &str) -> bool {
        let Some(session) = self.store.as_ref().and_then(|s| s.get(id)) else {
            return false;
        };
        let messages = session.messages.clone();
        let mode = session.mode;
        self.handle = Some(model.restore_chat_session(&messages));
        self.active_id = Some(id.to_owned());
        self.messages = messages;
        self.mode = mode;
        true
    }

    /// Close the active session and return to the mode picker.
    pub fn reset_to_picker(&mut self) {
        self.active_id = None;
        self.messages.clear();
        self.mode = None;
        self.handle = None;
    }

    /// Delete a stored session; deleting the active one returns to the picker.
    pub fn delete_session(&mut self, id: &str) -> bool {
        let Some(store) = self.store.as_mut() else {
            return false;
        };
        let removed = store.delete_session(id);
        if removed && self.active_id.as_deref() == Some(id) {
            self.reset_to_picker();
        }
        removed
    }

    /// Append the user's message and mark a reply as pending.
    ///
    /// Ignored (returns `None`) for blank text, while another turn is in
    /// flight, or when signed out. With no active session, one is created
    /// holding this message.
    pub fn begin_turn(&mut self, model: &dyn ChatModel, text: &str) -> Option<PendingTurn> {
        let text = text.trim();
        if text.is_empty() || self.in_flight.is_some() {
            return None;
        }
        let store = self.store.as_mut()?;
        let message = ChatMessage::user(text, store.now());

        let session_id = if let Some(id) = self.active_id.clone() {
            self.messages.push(message);
            match store.update_session(&id, self.messages.clone()) {
                SessionUpdate::Updated => id,
                SessionUpdate::Synthesized(new_id) => new_id,
            }
        } else {
            let session = store.create_session(self.mode, vec![message]);
            self.messages = session.messages;
            session.id
        };

        self.active_id = Some(session_id.clone());
        self.last_turn += 1;
        self.in_flight = Some((self.last_turn, session_id.clone()));
        let handle = self.handle.get_or_insert_with(|| model.initialize_chat()).clone();
        Some(PendingTurn { turn: self.last_turn, epoch: self.epoch, session_id, text: text.to_owned(), handle })
    }

    /// Merge the model's answer for `pending` and persist.
    ///
    /// Only the awaited turn clears the waiting state. A reply started
    /// under an earlier sign-in is dropped.
    pub fn complete_turn(&mut self, pending: PendingTurn, result: Result<String, ModelError>) -> TurnOutcome {
        let current = matches!(&self.in_flight, Some((turn, _)) if *turn == pending.turn);
        if current {
            self.in_flight = None;
        }
        let failed = result.is_err();
        let (text, extraction) = match result {
            Ok(reply) => {
                let extraction = replies::extract(&reply);
                let text = if extraction.clean_text.is_empty() && extraction.has_payload() {
                    STRUCTURED_ONLY_TEXT.to_owned()
                } else {
                    extraction.clean_text.clone()
                };
                (text, Some(extraction))
            }
            Err(e) => {
                log::warn!("model call for session {} failed: {e}", pending.session_id);
                let text = if e.retryable() { MODEL_BUSY_TEXT } else { MODEL_ERROR_TEXT };
                (text.to_owned(), None)
            }
        };

        let store = match self.store.as_mut() {
            Some(store) if pending.epoch == self.epoch => store,
            _ => {
                log::info!("dropping reply for session {}: signed out since", pending.session_id);
                return TurnOutcome { session_id: pending.session_id, applied_to_active: false, failed, extraction: None };
            }
        };
        let reply = ChatMessage::model(text, store.now());

        if current && self.active_id.as_deref() == Some(pending.session_id.as_str()) {
            self.messages.push(reply);
            let session_id = match store.update_session(&pending.session_id, self.messages.clone()) {
                SessionUpdate::Updated => pending.session_id,
                SessionUpdate::Synthesized(new_id) => {
                    self.active_id = Some(new_id.clone());
                    new_id
                }
            };
            if !failed {
                self.handle = Some(pending.handle);
            }
            return TurnOutcome { session_id, applied_to_active: true, failed, extraction };
        }

        match store.get(&pending.session_id) {
            Some(session) => {
                log::info!("reply for inactive session {} saved to its history", pending.session_id);
                let mut messages = session.messages.clone();
                messages.push(reply);
                store.update_session(&pending.session_id, messages);
            }
            None => log::info!("dropping reply for deleted session {}", pending.session_id),
        }
        TurnOutcome { session_id: pending.session_id, applied_to_active: false, failed, extraction: None }
    }

    /// `begin_turn`, model call, `complete_turn` in one step.
    ///
    /// Holds `&mut self` across the await, so UI code drives the two halves
    /// itself; this form serves hosts that own the state outright.
    pub async fn send_turn(&mut self, model: &dyn ChatModel, text: &str) -> Option<TurnOutcome> {
        let mut pending = self.begin_turn(model, text)?;
        let result = model.send_message(&mut pending.handle, &pending.text).await;
        Some(self.complete_turn(pending, result))
    }
}
