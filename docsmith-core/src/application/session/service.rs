use crate::agent::AgentError;
use crate::types::{ChatMessage, MessageRole};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session '{session_id}' not found")]
    NotFound { session_id: String },
    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            SessionError::NotFound { .. } => {
                "The conversation session is gone. Restart to begin a new one.".to_string()
            }
            SessionError::Agent(err) => err.user_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: String,
    pub invocation_id: String,
    pub author: String,
    pub message: ChatMessage,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    pub fn new(
        invocation_id: impl Into<String>,
        author: impl Into<String>,
        message: ChatMessage,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            invocation_id: invocation_id.into(),
            author: author.into(),
            message,
            timestamp: Utc::now(),
        }
    }

    /// Assistant text worth showing; `None` for tool traffic and blank replies.
    pub fn text(&self) -> Option<&str> {
        if self.message.role != MessageRole::Assistant {
            return None;
        }
        self.message
            .content
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: String,
    pub app_name: String,
    pub user_id: String,
    pub state: Map<String, Value>,
    pub events: Vec<Event>,
}

impl Session {
    /// Transcript reconstructed from the session's events.
    pub fn history(&self) -> Vec<ChatMessage> {
        self.events.iter().map(|event| event.message.clone()).collect()
    }
}

#[derive(Default)]
pub struct InMemorySessionService {
    sessions: Mutex<HashMap<String, Session>>,
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        state: Map<String, Value>,
    ) -> Session {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            app_name: app_name.to_string(),
            user_id: user_id.to_string(),
            state,
            events: Vec::new(),
        };
        debug!(session_id = session.id.as_str(), app_name, "Created session");
        self.sessions
            .lock()
            .await
            .insert(session.id.clone(), session.clone());
        session
    }

    /// Looks a session up, scoped to the app and user that created it.
    pub async fn get_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Option<Session> {
        self.sessions
            .lock()
            .await
            .get(session_id)
            .filter(|session| session.app_name == app_name && session.user_id == user_id)
            .cloned()
    }

    pub async fn append_event(&self, session_id: &str, event: Event) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound {
                session_id: session_id.to_string(),
            })?;
        session.events.push(event);
        Ok(())
    }
}
