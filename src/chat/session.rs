//! Append-only chat transcript and its manager
//!
//! The transcript starts with a one-time system turn (never displayed) and
//! grows strictly by appends. A user turn whose assistant call fails stays
//! in the transcript marked `failed` and is excluded from future provider
//! history, since the model never saw it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::provider::{ChatRequest, HistoryMessage, Provider, ProviderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One transcript entry. Never edited after append, except for the `failed`
/// mark set when the paired assistant call does not complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub failed: bool,
}

impl ChatTurn {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            failed: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("assistant call failed: {0}")]
    Provider(#[from] ProviderError),
}

#[derive(Default)]
struct ChatSession {
    turns: Vec<ChatTurn>,
    initialized: bool,
}

impl ChatSession {
    /// History for the provider: everything the model has actually seen.
    fn provider_history(&self) -> Vec<HistoryMessage> {
        self.turns
            .iter()
            .filter(|turn| !turn.failed)
            .map(|turn| HistoryMessage {
                role: turn.role,
                content: turn.content.clone(),
            })
            .collect()
    }
}

/// Owns the session transcript and forwards turns to the hosted model.
///
/// The session is created lazily: the first operation initializes it with
/// the system prompt. One mutex serializes turns, so concurrent handlers
/// cannot interleave appends.
pub struct ChatManager {
    provider: Arc<dyn Provider>,
    system_prompt: String,
    session: Mutex<ChatSession>,
}

impl ChatManager {
    pub fn new(provider: Arc<dyn Provider>, system_prompt: impl Into<String>) -> Self {
        Self {
            provider,
            system_prompt: system_prompt.into(),
            session: Mutex::new(ChatSession::default()),
        }
    }

    /// Run the one-time system turn if it has not happened yet.
    ///
    /// Idempotent: the `initialized` flag gates the exchange, and on
    /// provider failure nothing is appended so a later call retries
    /// cleanly.
    pub async fn ensure_initialized(&self) -> Result<(), ChatError> {
        let mut session = self.session.lock().await;
        self.initialize_locked(&mut session).await
    }

    async fn initialize_locked(&self, session: &mut ChatSession) -> Result<(), ChatError> {
        if session.initialized {
            return Ok(());
        }

        let reply = self
            .provider
            .send(ChatRequest {
                history: Vec::new(),
                input: self.system_prompt.clone(),
            })
            .await?;

        session.turns.push(ChatTurn::new(Role::System, self.system_prompt.clone()));
        session.turns.push(ChatTurn::new(Role::Assistant, reply));
        session.initialized = true;
        Ok(())
    }

    /// Append a user turn, forward the history, append and return the
    /// assistant reply. The transcript grows by exactly two on success.
    pub async fn send(&self, text: &str) -> Result<String, ChatError> {
        let mut session = self.session.lock().await;
        self.initialize_locked(&mut session).await?;

        let history = session.provider_history();
        session.turns.push(ChatTurn::new(Role::User, text));
        let user_index = session.turns.len() - 1;

        match self
            .provider
            .send(ChatRequest { history, input: text.to_string() })
            .await
        {
            Ok(reply) => {
                session.turns.push(ChatTurn::new(Role::Assistant, reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                session.turns[user_index].failed = true;
                Err(e.into())
            }
        }
    }

    /// The full transcript, system turn included.
    pub async fn transcript(&self) -> Vec<ChatTurn> {
        self.session.lock().await.turns.clone()
    }

    /// The transcript as shown to the user: the system turn is hidden.
    pub async fn visible_transcript(&self) -> Vec<ChatTurn> {
        self.session
            .lock()
            .await
            .turns
            .iter()
            .filter(|turn| turn.role != Role::System)
            .cloned()
            .collect()
    }
}
