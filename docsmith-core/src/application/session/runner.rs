use super::service::{Event, InMemorySessionService, SessionError};
use crate::agent::Agent;
use crate::types::{ChatMessage, RunContext};
use futures::StreamExt;
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Runs an agent against a stored session, persisting each event it yields.
pub struct SessionRunner {
    app_name: String,
    agent: Arc<Agent>,
    sessions: Arc<InMemorySessionService>,
}

impl SessionRunner {
    pub fn new(
        app_name: impl Into<String>,
        agent: Arc<Agent>,
        sessions: Arc<InMemorySessionService>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            agent,
            sessions,
        }
    }

    pub fn sessions(&self) -> &Arc<InMemorySessionService> {
        &self.sessions
    }

    /// Appends the user's message and streams the agent's events for this turn.
    pub async fn run(
        &self,
        user_id: &str,
        session_id: &str,
        new_message: &str,
    ) -> Result<BoxStream<'static, Result<Event, SessionError>>, SessionError> {
        let session = self
            .sessions
            .get_session(&self.app_name, user_id, session_id)
            .await
            .ok_or_else(|| SessionError::NotFound {
                session_id: session_id.to_string(),
            })?;
        let invocation_id = Uuid::new_v4().to_string();
        let user_message = ChatMessage::user(new_message);
        self.sessions
            .append_event(
                session_id,
                Event::new(invocation_id.clone(), "user", user_message.clone()),
            )
            .await?;
        let mut history = session.history();
        history.push(user_message);
        info!(
            session_id,
            invocation_id = invocation_id.as_str(),
            events = history.len(),
            "Running agent for session"
        );

        let sessions = Arc::clone(&self.sessions);
        let session_id = session_id.to_string();
        let stream = self
            .agent
            .run_streamed(history, RunContext::new(user_id))
            .then(move |item| {
                let sessions = Arc::clone(&sessions);
                let session_id = session_id.clone();
                let invocation_id = invocation_id.clone();
                async move {
                    let produced = item?;
                    let event = Event::new(invocation_id, produced.author, produced.message);
                    sessions.append_event(&session_id, event.clone()).await?;
                    Ok::<Event, SessionError>(event)
                }
            });
        Ok(stream.boxed())
    }
}
